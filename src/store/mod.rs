//! Store module — the persisted secrets and workspaces.
//!
//! This module provides:
//! - `SecretEntry` and plaintext resolution (`secret`)
//! - `Workspace` and `ScriptEntry` (`workspace`)
//! - The `Store` root aggregate and its operations (`document`)
//! - YAML load/save with atomic writes (`format`)

pub mod document;
pub mod format;
pub mod secret;
pub mod workspace;

// Re-export the most commonly used items.
pub use document::Store;
pub use format::ensure_store_file;
pub use secret::SecretEntry;
pub use workspace::{ScriptEntry, Workspace};
