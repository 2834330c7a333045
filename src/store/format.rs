//! On-disk store document.
//!
//! The store is a single YAML file with two top-level sequences:
//!
//! ```yaml
//! secrets:
//!   - name: token
//!     value: aGVsbG8...
//!     secure: true
//! workspaces:
//!   - name: app
//!     path: /home/user/app
//!     scripts:
//!       - name: deploy
//!         command: ./deploy.sh --token <secrets.token>
//! ```
//!
//! It is always read and rewritten whole.

use std::fs;
use std::path::Path;

use super::Store;
use crate::errors::{PassportError, Result};

/// Create `path` (and its parent directory) holding an empty store,
/// unless it already exists.
pub fn ensure_store_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::debug!(dir = %parent.display(), "created config directory");
        }
    }

    if path.exists() {
        return Ok(());
    }

    write_store(path, &Store::default())
}

/// Read and parse the store at `path`.
///
/// A missing or blank file is an empty store.  A file that does not
/// parse is an error, so a later save cannot silently wipe it.
pub fn read_store(path: &Path) -> Result<Store> {
    if !path.exists() {
        return Ok(Store::default());
    }

    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Store::default());
    }

    serde_yaml::from_str(&text)
        .map_err(|e| PassportError::InvalidStoreFormat(format!("{}: {e}", path.display())))
}

/// Write the store to disk **atomically**.
///
/// The document goes to a temp file in the same directory which is then
/// renamed over `path`, so readers never see a half-written store.
pub fn write_store(path: &Path, store: &Store) -> Result<()> {
    let text = serde_yaml::to_string(store)
        .map_err(|e| PassportError::SerializationError(format!("store: {e}")))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, text.as_bytes())?;

    // Owner-only: the file may hold plaintext secrets.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
