//! `passport workspaces` — register and unregister directories.

use crate::cli::output;
use crate::cli::{confirm, current_workspace_path, Cli, Context};
use crate::errors::{PassportError, Result};

/// Execute `workspaces ls`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let store = ctx.open_store()?;
    let current = current_workspace_path().ok();

    output::info(&format!("{} workspace(s)", store.workspaces.len()));
    output::print_workspaces_table(&store.workspaces, current.as_deref());

    Ok(())
}

/// Execute `workspaces add`.
pub fn execute_add(cli: &Cli, name: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut store = ctx.open_store()?;
    let path = current_workspace_path()?;

    let registered = match name {
        Some(name) => {
            store.add_workspace(name, &path)?;
            name.to_string()
        }
        None => {
            if store.get_workspace(&path).is_ok() {
                return Err(PassportError::WorkspacePathExists(path));
            }
            store.ensure_workspace(&path)?.name.clone()
        }
    };

    ctx.save_store(&store)?;

    output::success(&format!("Registered workspace '{registered}' at {path}"));

    Ok(())
}

/// Execute `workspaces rm`.
pub fn execute_remove(cli: &Cli, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut store = ctx.open_store()?;
    let path = current_workspace_path()?;

    let workspace = store.get_workspace(&path)?;
    let prompt = format!(
        "Unregister workspace '{}' and its {} script(s)?",
        workspace.name,
        workspace.scripts.len()
    );

    if !confirm(&prompt, force)? {
        output::info("Cancelled.");
        return Ok(());
    }

    store.remove_workspace(&path)?;
    ctx.save_store(&store)?;

    output::success(&format!("Unregistered workspace at {path}"));

    Ok(())
}
