//! The persisted root: every secret and every workspace.
//!
//! `Store` is plain data plus the operations that keep its invariants:
//! names are non-empty and case-sensitively unique within their
//! collection, and every validation runs before any mutation.  Lookups
//! are linear scans; stores hold tens of entries, not thousands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::format;
use super::secret::SecretEntry;
use super::workspace::Workspace;
use crate::crypto::CryptoProvider;
use crate::errors::{PassportError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub secrets: Vec<SecretEntry>,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

impl Store {
    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Load the whole store from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let store = format::read_store(path)?;
        tracing::debug!(
            path = %path.display(),
            secrets = store.secrets.len(),
            workspaces = store.workspaces.len(),
            "loaded store"
        );
        Ok(store)
    }

    /// Write the whole store back to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        format::write_store(path, self)?;
        tracing::debug!(path = %path.display(), "saved store");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Secrets
    // ------------------------------------------------------------------

    /// Add a new secret, encrypting it first when `encrypt` is set.
    pub fn add_secret(
        &mut self,
        name: &str,
        value: &str,
        encrypt: bool,
        crypto: &dyn CryptoProvider,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(PassportError::SecretNameEmpty);
        }
        if value.is_empty() {
            return Err(PassportError::SecretValueEmpty);
        }
        if self.get_secret(name).is_ok() {
            return Err(PassportError::SecretAlreadyExists(name.to_string()));
        }

        let stored = if encrypt {
            crypto.encrypt_string(value)?
        } else {
            value.to_string()
        };

        self.secrets.push(SecretEntry {
            name: name.to_string(),
            value: stored,
            secure: encrypt,
        });
        Ok(())
    }

    pub fn get_secret(&self, name: &str) -> Result<&SecretEntry> {
        if name.is_empty() {
            return Err(PassportError::SecretNameEmpty);
        }

        self.secrets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| PassportError::SecretNotFound(name.to_string()))
    }

    /// Remove a secret by exact name, keeping the order of the rest.
    pub fn remove_secret(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PassportError::SecretNameEmpty);
        }

        let idx = self
            .secrets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| PassportError::SecretNotFound(name.to_string()))?;
        self.secrets.remove(idx);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Workspaces
    // ------------------------------------------------------------------

    /// Register a workspace.  Both `name` and `path` must be unused.
    pub fn add_workspace(&mut self, name: &str, path: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PassportError::WorkspaceNameEmpty);
        }
        if path.is_empty() {
            return Err(PassportError::WorkspacePathEmpty);
        }

        for w in &self.workspaces {
            if w.name == name {
                return Err(PassportError::WorkspaceNameExists(name.to_string()));
            }
            if w.path == path {
                return Err(PassportError::WorkspacePathExists(path.to_string()));
            }
        }

        self.workspaces.push(Workspace::new(name, path));
        Ok(())
    }

    /// Find the workspace registered at exactly `path`.
    ///
    /// No normalisation happens: trailing separators and symlinks make a
    /// different path.
    pub fn get_workspace(&self, path: &str) -> Result<&Workspace> {
        if path.is_empty() {
            return Err(PassportError::WorkspacePathEmpty);
        }

        self.workspaces
            .iter()
            .find(|w| w.path == path)
            .ok_or_else(|| PassportError::WorkspaceNotFound(path.to_string()))
    }

    pub fn get_workspace_mut(&mut self, path: &str) -> Result<&mut Workspace> {
        if path.is_empty() {
            return Err(PassportError::WorkspacePathEmpty);
        }

        self.workspaces
            .iter_mut()
            .find(|w| w.path == path)
            .ok_or_else(|| PassportError::WorkspaceNotFound(path.to_string()))
    }

    /// Return the workspace at `path`, registering it first if needed.
    ///
    /// New workspaces are named after the directory's last component, or
    /// the full path (suffixed if needed) when that name is already taken.
    pub fn ensure_workspace(&mut self, path: &str) -> Result<&mut Workspace> {
        if path.is_empty() {
            return Err(PassportError::WorkspacePathEmpty);
        }

        if !self.workspaces.iter().any(|w| w.path == path) {
            let name = self.default_workspace_name(path);
            self.add_workspace(&name, path)?;
            tracing::debug!(%name, %path, "registered workspace");
        }

        self.get_workspace_mut(path)
    }

    /// Unregister the workspace at `path` together with its scripts.
    pub fn remove_workspace(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(PassportError::WorkspacePathEmpty);
        }

        let idx = self
            .workspaces
            .iter()
            .position(|w| w.path == path)
            .ok_or_else(|| PassportError::WorkspaceNotFound(path.to_string()))?;
        self.workspaces.remove(idx);
        Ok(())
    }

    /// First free name among the directory's last component, the full
    /// path, and the full path with a `-2`, `-3`, ... suffix.
    fn default_workspace_name(&self, path: &str) -> String {
        let taken = |name: &str| self.workspaces.iter().any(|w| w.name == name);

        let base = Path::new(path).file_name().and_then(|n| n.to_str());
        if let Some(base) = base.filter(|b| !taken(*b)) {
            return base.to_string();
        }
        if !taken(path) {
            return path.to_string();
        }

        (2..)
            .map(|n| format!("{path}-{n}"))
            .find(|candidate| !taken(candidate.as_str()))
            .unwrap_or_else(|| path.to_string())
    }
}
