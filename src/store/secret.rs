//! A single named secret as it appears in the store document.

use serde::{Deserialize, Serialize};

use crate::crypto::CryptoProvider;

/// A named secret.  `value` holds base64 ciphertext when `secure` is
/// set, the plaintext otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEntry {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub secure: bool,
}

impl SecretEntry {
    /// Return the plaintext value.
    ///
    /// A secure value that cannot be decrypted (wrong machine, corrupted
    /// text) resolves to an empty string instead of an error, so one bad
    /// secret never aborts a script run or a listing.  Call
    /// `CryptoProvider::decrypt_string` directly to observe the failure.
    pub fn resolve_value(&self, crypto: &dyn CryptoProvider) -> String {
        if !self.secure {
            return self.value.clone();
        }

        match crypto.decrypt_string(&self.value) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::warn!(secret = %self.name, error = %e, "substituting empty value");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HostCryptoProvider;

    fn entry(value: &str, secure: bool) -> SecretEntry {
        SecretEntry {
            name: "token".into(),
            value: value.into(),
            secure,
        }
    }

    #[test]
    fn plain_value_is_returned_verbatim() {
        let crypto = HostCryptoProvider::with_machine_id("host");
        assert_eq!(entry("hi", false).resolve_value(&crypto), "hi");
    }

    #[test]
    fn secure_value_is_decrypted() {
        let crypto = HostCryptoProvider::with_machine_id("host");
        let sealed = crypto.encrypt_string("hi").unwrap();
        assert_eq!(entry(&sealed, true).resolve_value(&crypto), "hi");
    }

    #[test]
    fn undecryptable_value_resolves_to_empty() {
        let crypto = HostCryptoProvider::with_machine_id("host");
        assert_eq!(entry("garbage", true).resolve_value(&crypto), "");
    }
}
