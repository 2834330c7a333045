//! Directory-scoped workspaces and the scripts they hold.

use serde::{Deserialize, Serialize};

use crate::errors::{PassportError, Result};

/// A named command template.  The command may contain
/// `<secrets.NAME>` markers, resolved only when the script runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub name: String,
    pub command: String,
}

/// A directory registered with Passport, plus its scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub scripts: Vec<ScriptEntry>,
}

impl Workspace {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            scripts: Vec::new(),
        }
    }

    /// Add a script.  Names are unique (case-sensitive) per workspace.
    pub fn add_script(&mut self, name: &str, command: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PassportError::ScriptNameEmpty);
        }
        if command.is_empty() {
            return Err(PassportError::ScriptCommandEmpty);
        }
        if self.scripts.iter().any(|s| s.name == name) {
            return Err(PassportError::ScriptNameExists(name.to_string()));
        }

        self.scripts.push(ScriptEntry {
            name: name.to_string(),
            command: command.to_string(),
        });
        Ok(())
    }

    pub fn get_script(&self, name: &str) -> Result<&ScriptEntry> {
        if name.is_empty() {
            return Err(PassportError::ScriptNameEmpty);
        }

        self.scripts
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| PassportError::ScriptNotFound(name.to_string()))
    }

    /// Remove a script, keeping the order of the rest.
    pub fn remove_script(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PassportError::ScriptNameEmpty);
        }

        let idx = self
            .scripts
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| PassportError::ScriptNotFound(name.to_string()))?;
        self.scripts.remove(idx);
        Ok(())
    }
}
