//! The encrypt/decrypt seam used by the store and the interpolator.

use std::path::PathBuf;

use zeroize::Zeroizing;

use super::encryption;
use super::machine::{derive_key, MachineIdSource, KEY_LEN};
use crate::errors::Result;

/// Encrypts and decrypts secret values as storable text.
pub trait CryptoProvider {
    /// Encrypt `plaintext`, returning base64 ciphertext.
    fn encrypt_string(&self, plaintext: &str) -> Result<String>;

    /// Decrypt text produced by `encrypt_string`.
    ///
    /// Returns `DecryptionFailed` for any malformed, truncated or
    /// tampered input.
    fn decrypt_string(&self, ciphertext: &str) -> Result<String>;
}

/// AES-256-GCM keyed by a hash of this machine's identifier.
#[derive(Debug, Clone)]
pub struct HostCryptoProvider {
    source: MachineIdSource,
}

impl HostCryptoProvider {
    /// Provider keyed by the operating system's machine identifier.
    pub fn new() -> Self {
        Self {
            source: MachineIdSource::Platform,
        }
    }

    /// Provider keyed by the contents of `path`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: MachineIdSource::File(path.into()),
        }
    }

    /// Provider keyed by a fixed identifier.
    pub fn with_machine_id(id: impl Into<String>) -> Self {
        Self {
            source: MachineIdSource::Fixed(Zeroizing::new(id.into())),
        }
    }

    fn key(&self) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let id = self.source.read()?;
        Ok(derive_key(&id))
    }
}

impl Default for HostCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider for HostCryptoProvider {
    fn encrypt_string(&self, plaintext: &str) -> Result<String> {
        let key = self.key()?;
        encryption::encrypt_string(&key[..], plaintext)
    }

    fn decrypt_string(&self, ciphertext: &str) -> Result<String> {
        let key = self.key()?;
        encryption::decrypt_string(&key[..], ciphertext)
    }
}
