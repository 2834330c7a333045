//! `passport run` — run a workspace script with secrets interpolated.

use crate::cli::output;
use crate::cli::{current_workspace_path, Cli, Context};
use crate::errors::Result;
use crate::script;

/// Execute the `run` command and return the script's exit code.
pub fn execute(cli: &Cli, name: &str) -> Result<i32> {
    let ctx = Context::load(cli)?;
    let store = ctx.open_store()?;
    let crypto = ctx.crypto();

    let path = current_workspace_path()?;
    let workspace = store.get_workspace(&path)?;
    let entry = workspace.get_script(name)?;

    tracing::debug!(workspace = %workspace.name, script = %entry.name, "running script");

    let code = script::run_script(entry, &store, &crypto)?;

    if code != 0 {
        output::warning(&format!("Script '{name}' exited with code {code}"));
    }

    Ok(code)
}
