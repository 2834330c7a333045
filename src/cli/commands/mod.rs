//! One module per top-level subcommand.

pub mod completions;
pub mod run;
pub mod scripts;
pub mod secrets;
pub mod workspaces;
