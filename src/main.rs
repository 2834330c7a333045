use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use passport::cli::commands::{completions, run, scripts, secrets, workspaces};
use passport::cli::{Cli, Commands, ScriptsAction, SecretsAction, WorkspacesAction};

fn main() {
    // Diagnostics go to stderr so script output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PASSPORT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Secrets {
            ref action,
            ref name,
        } => match (action, name) {
            (Some(SecretsAction::Ls), _) => secrets::execute_list(&cli),
            (
                Some(SecretsAction::Add {
                    name,
                    value,
                    plain_text,
                    encrypt,
                }),
                _,
            ) => secrets::execute_add(&cli, name, value.as_deref(), *plain_text, *encrypt),
            (Some(SecretsAction::Rm { name, force }), _) => {
                secrets::execute_remove(&cli, name, *force)
            }
            (None, Some(name)) => secrets::execute_show(&cli, name),
            (None, None) => print_subcommand_help("secrets"),
        }
        .map(|()| 0),
        Commands::Scripts {
            ref action,
            ref name,
        } => match (action, name) {
            (Some(ScriptsAction::Ls), _) => scripts::execute_list(&cli),
            (Some(ScriptsAction::Add { name, command }), _) => {
                scripts::execute_add(&cli, name, command)
            }
            (Some(ScriptsAction::Rm { name }), _) => scripts::execute_remove(&cli, name),
            (None, Some(name)) => scripts::execute_show(&cli, name),
            (None, None) => print_subcommand_help("scripts"),
        }
        .map(|()| 0),
        Commands::Workspaces { ref action } => match action {
            WorkspacesAction::Ls => workspaces::execute_list(&cli),
            WorkspacesAction::Add { name } => workspaces::execute_add(&cli, name.as_deref()),
            WorkspacesAction::Rm { force } => workspaces::execute_remove(&cli, *force),
        }
        .map(|()| 0),
        Commands::Run { ref script } => run::execute(&cli, script),
        Commands::Completions { shell } => completions::execute(shell).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            passport::cli::output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Print help for a noun command invoked without a name or action.
fn print_subcommand_help(name: &str) -> passport::errors::Result<()> {
    let mut cmd = Cli::command();
    if let Some(sub) = cmd.find_subcommand_mut(name) {
        sub.print_help()?;
    }
    Ok(())
}
