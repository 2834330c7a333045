//! Host identity and key derivation.
//!
//! The store key is never written anywhere: it is `SHA-256(machine id)`,
//! recomputed on demand.  Secrets encrypted on one host therefore cannot
//! be decrypted on another, and that is accepted behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::errors::{PassportError, Result};

/// Length of the derived key (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Where the machine identifier comes from.
#[derive(Debug, Clone)]
pub enum MachineIdSource {
    /// Ask the operating system.
    Platform,
    /// Read the identifier from a file (trimmed).
    File(PathBuf),
    /// Use a fixed identifier.
    Fixed(Zeroizing<String>),
}

impl MachineIdSource {
    /// Resolve the identifier bytes.
    pub fn read(&self) -> Result<Zeroizing<String>> {
        let id = match self {
            MachineIdSource::Platform => platform_machine_id()?,
            MachineIdSource::File(path) => read_id_file(path)?,
            MachineIdSource::Fixed(id) => id.clone(),
        };

        if id.trim().is_empty() {
            return Err(PassportError::KeyDerivationFailed(
                "machine identifier is empty".into(),
            ));
        }

        Ok(id)
    }
}

/// Derive the symmetric key from a machine identifier.
pub fn derive_key(machine_id: &str) -> Zeroizing<[u8; KEY_LEN]> {
    let digest = Sha256::digest(machine_id.as_bytes());
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&digest);
    key
}

fn read_id_file(path: &Path) -> Result<Zeroizing<String>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PassportError::KeyDerivationFailed(format!(
            "cannot read machine id from {}: {e}",
            path.display()
        ))
    })?;
    Ok(Zeroizing::new(raw.trim().to_string()))
}

#[cfg(target_os = "linux")]
fn platform_machine_id() -> Result<Zeroizing<String>> {
    const CANDIDATES: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

    for candidate in CANDIDATES {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        let id = read_id_file(path)?;
        if !id.is_empty() {
            tracing::debug!(source = candidate, "using machine id");
            return Ok(id);
        }
    }

    Err(PassportError::KeyDerivationFailed(
        "no machine id found in /etc/machine-id or /var/lib/dbus/machine-id \
         (set machine_id_file in settings.toml)"
            .into(),
    ))
}

#[cfg(target_os = "macos")]
fn platform_machine_id() -> Result<Zeroizing<String>> {
    let output = std::process::Command::new("ioreg")
        .args(["-rd1", "-c", "IOPlatformExpertDevice"])
        .output()
        .map_err(|e| PassportError::KeyDerivationFailed(format!("ioreg: {e}")))?;

    let text = String::from_utf8_lossy(&output.stdout);
    text.lines()
        .find(|line| line.contains("IOPlatformUUID"))
        .and_then(|line| line.split('"').nth(3))
        .map(|uuid| Zeroizing::new(uuid.to_string()))
        .ok_or_else(|| {
            PassportError::KeyDerivationFailed("IOPlatformUUID missing from ioreg output".into())
        })
}

#[cfg(windows)]
fn platform_machine_id() -> Result<Zeroizing<String>> {
    let output = std::process::Command::new("reg")
        .args([
            "query",
            r"HKLM\SOFTWARE\Microsoft\Cryptography",
            "/v",
            "MachineGuid",
            "/reg:64",
        ])
        .output()
        .map_err(|e| PassportError::KeyDerivationFailed(format!("reg query: {e}")))?;

    let text = String::from_utf8_lossy(&output.stdout);
    text.lines()
        .find(|line| line.contains("MachineGuid"))
        .and_then(|line| line.split_whitespace().last())
        .map(|guid| Zeroizing::new(guid.to_string()))
        .ok_or_else(|| {
            PassportError::KeyDerivationFailed("MachineGuid missing from registry".into())
        })
}

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
fn platform_machine_id() -> Result<Zeroizing<String>> {
    Err(PassportError::KeyDerivationFailed(
        "no machine id source on this platform (set machine_id_file in settings.toml)".into(),
    ))
}
