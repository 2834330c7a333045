//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::store::{SecretEntry, Workspace};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of secret names and whether each is encrypted.
pub fn print_secrets_table(secrets: &[SecretEntry]) {
    if secrets.is_empty() {
        info("No secrets stored yet.");
        tip("Run `passport secrets add --name <NAME>` to add your first secret.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Encrypted"]);

    for s in secrets {
        table.add_row(vec![s.name.clone(), yes_no(s.secure).to_string()]);
    }

    println!("{table}");
}

/// Print a workspace's scripts with their command templates.
pub fn print_scripts_table(workspace: &Workspace) {
    if workspace.scripts.is_empty() {
        info("No scripts in this workspace yet.");
        tip("Run `passport scripts add --name <NAME> --command <COMMAND>`.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Command"]);

    for s in &workspace.scripts {
        table.add_row(vec![s.name.clone(), s.command.clone()]);
    }

    println!("{table}");
}

/// Print all workspaces, marking the one at `current` (if any).
pub fn print_workspaces_table(workspaces: &[Workspace], current: Option<&str>) {
    if workspaces.is_empty() {
        info("No workspaces registered yet.");
        tip("Run `passport workspaces add` inside a project directory.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Name", "Path", "Scripts"]);

    for w in workspaces {
        let marker = if Some(w.path.as_str()) == current { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            w.name.clone(),
            w.path.clone(),
            w.scripts.len().to_string(),
        ]);
    }

    println!("{table}");
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
