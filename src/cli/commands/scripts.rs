//! `passport scripts` — manage the current workspace's scripts.

use crate::cli::output;
use crate::cli::{current_workspace_path, Cli, Context};
use crate::errors::Result;

/// Execute `scripts --name <NAME>`: print a script's command template.
pub fn execute_show(cli: &Cli, name: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let store = ctx.open_store()?;

    let workspace = store.get_workspace(&current_workspace_path()?)?;
    let script = workspace.get_script(name)?;

    println!("Command: {}", script.command);

    Ok(())
}

/// Execute `scripts ls`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let store = ctx.open_store()?;

    let workspace = store.get_workspace(&current_workspace_path()?)?;

    output::info(&format!("Workspace: {}", workspace.name));
    output::print_scripts_table(workspace);

    Ok(())
}

/// Execute `scripts add`.  The current directory becomes a workspace
/// if it is not one already.
pub fn execute_add(cli: &Cli, name: &str, command: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut store = ctx.open_store()?;
    let path = current_workspace_path()?;

    let workspace = store.ensure_workspace(&path)?;
    workspace.add_script(name, command)?;
    let workspace_name = workspace.name.clone();

    ctx.save_store(&store)?;

    output::success(&format!(
        "Script '{name}' added to workspace '{workspace_name}'"
    ));
    output::tip(&format!("Run it with: passport run {name}"));

    Ok(())
}

/// Execute `scripts rm`.
pub fn execute_remove(cli: &Cli, name: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut store = ctx.open_store()?;

    store
        .get_workspace_mut(&current_workspace_path()?)?
        .remove_script(name)?;
    ctx.save_store(&store)?;

    output::success(&format!("Removed script '{name}'"));

    Ok(())
}
