//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::config::{default_config_dir, Settings};
use crate::crypto::HostCryptoProvider;
use crate::errors::{PassportError, Result};
use crate::store::{ensure_store_file, Store};

/// Passport CLI: local secret vault and workspace script runner.
#[derive(Parser)]
#[command(
    name = "passport",
    about = "Local secret vault and workspace script runner",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default: <user config dir>/.passport)
    #[arg(long, env = "PASSPORT_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show a secret, or manage secrets
    #[command(args_conflicts_with_subcommands = true)]
    Secrets {
        #[command(subcommand)]
        action: Option<SecretsAction>,

        /// Name of a secret to show
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show a script, or manage the current workspace's scripts
    #[command(args_conflicts_with_subcommands = true)]
    Scripts {
        #[command(subcommand)]
        action: Option<ScriptsAction>,

        /// Name of a script to show
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Manage workspaces (directories with scripts)
    Workspaces {
        #[command(subcommand)]
        action: WorkspacesAction,
    },

    /// Run a script from the current workspace
    Run {
        /// Script name
        script: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Secret subcommands.
#[derive(clap::Subcommand)]
pub enum SecretsAction {
    /// List all secrets
    Ls,

    /// Add a secret
    Add {
        /// Secret name
        #[arg(short, long)]
        name: String,

        /// Secret value (omit to read from stdin or a prompt)
        #[arg(long)]
        value: Option<String>,

        /// Store the value unencrypted
        #[arg(long, conflicts_with = "encrypt")]
        plain_text: bool,

        /// Encrypt the value even if settings say otherwise
        #[arg(long)]
        encrypt: bool,
    },

    /// Remove a secret
    Rm {
        /// Secret name
        #[arg(short, long)]
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Script subcommands (always scoped to the current directory).
#[derive(clap::Subcommand)]
pub enum ScriptsAction {
    /// List scripts in the current workspace
    Ls,

    /// Add a script (registers the current directory if needed)
    Add {
        /// Script name
        #[arg(short, long)]
        name: String,

        /// Command to run; may reference secrets as <secrets.NAME>
        #[arg(short, long, allow_hyphen_values = true)]
        command: String,
    },

    /// Remove a script from the current workspace
    Rm {
        /// Script name
        #[arg(short, long)]
        name: String,
    },
}

/// Workspace subcommands.
#[derive(clap::Subcommand)]
pub enum WorkspacesAction {
    /// List all registered workspaces
    Ls,

    /// Register the current directory as a workspace
    Add {
        /// Workspace name (default: the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Unregister the current directory and drop its scripts
    Rm {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs to reach the store.
pub struct Context {
    pub config_dir: PathBuf,
    pub settings: Settings,
    pub store_path: PathBuf,
}

impl Context {
    /// Resolve the config directory, load settings, and make sure the
    /// store file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_dir = match &cli.config_dir {
            Some(dir) => dir.clone(),
            None => default_config_dir()?,
        };

        let settings = Settings::load(&config_dir)?;
        let store_path = settings.store_path(&config_dir);
        ensure_store_file(&store_path)?;

        Ok(Self {
            config_dir,
            settings,
            store_path,
        })
    }

    pub fn open_store(&self) -> Result<Store> {
        Store::load(&self.store_path)
    }

    pub fn save_store(&self, store: &Store) -> Result<()> {
        store.save(&self.store_path)
    }

    pub fn crypto(&self) -> HostCryptoProvider {
        self.settings.crypto_provider(&self.config_dir)
    }
}

/// The current directory as a workspace path.
///
/// Workspaces are matched on this exact string.
pub fn current_workspace_path() -> Result<String> {
    let cwd = std::env::current_dir()?;
    cwd.to_str().map(str::to_string).ok_or_else(|| {
        PassportError::CommandFailed(format!(
            "current directory {} is not valid UTF-8",
            cwd.display()
        ))
    })
}

/// Get a secret value, trying in order:
/// 1. The `--value` argument (with a shell-history warning)
/// 2. Piped stdin
/// 3. Interactive hidden prompt
pub fn read_secret_value(name: &str, value: Option<&str>) -> Result<String> {
    if let Some(v) = value {
        output::warning("Value provided on command line; it may appear in shell history.");
        return Ok(v.to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(strip_line_ending(&buf).to_string());
    }

    dialoguer::Password::new()
        .with_prompt(format!("Enter value for {name}"))
        .interact()
        .map_err(|e| PassportError::CommandFailed(format!("input prompt: {e}")))
}

/// Drop a single trailing `\n` or `\r\n`; other whitespace is part of the value.
fn strip_line_ending(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(value)
}

/// Ask for confirmation unless `force` is set.
pub fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PassportError::CommandFailed(format!("confirm prompt: {e}")))
}
