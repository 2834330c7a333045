//! `passport secrets` — show, list, add and remove secrets.

use crate::cli::output;
use crate::cli::{confirm, read_secret_value, Cli, Context};
use crate::errors::{PassportError, Result};

/// Execute `secrets --name <NAME>`: print one secret, decrypted.
pub fn execute_show(cli: &Cli, name: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let store = ctx.open_store()?;
    let crypto = ctx.crypto();

    let secret = store.get_secret(name)?;

    println!("Name: {}", secret.name);
    println!("Value: {}", secret.resolve_value(&crypto));
    println!("Secure: {}", secret.secure);

    Ok(())
}

/// Execute `secrets ls`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let store = ctx.open_store()?;

    output::info(&format!("{} secret(s)", store.secrets.len()));
    output::print_secrets_table(&store.secrets);

    Ok(())
}

/// Execute `secrets add`.
pub fn execute_add(
    cli: &Cli,
    name: &str,
    value: Option<&str>,
    plain_text: bool,
    encrypt: bool,
) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut store = ctx.open_store()?;

    // Fail on a bad name before prompting for a value.
    if name.is_empty() {
        return Err(PassportError::SecretNameEmpty);
    }
    if store.get_secret(name).is_ok() {
        return Err(PassportError::SecretAlreadyExists(name.to_string()));
    }

    let secret_value = read_secret_value(name, value)?;
    let secure = if plain_text {
        false
    } else {
        encrypt || ctx.settings.encrypt_by_default
    };

    store.add_secret(name, &secret_value, secure, &ctx.crypto())?;
    ctx.save_store(&store)?;

    let kind = if secure { "encrypted" } else { "plain-text" };
    output::success(&format!(
        "Secret '{name}' added ({kind}, {} total)",
        store.secrets.len()
    ));
    output::tip(&format!("Reference it in a script as <secrets.{name}>"));

    Ok(())
}

/// Execute `secrets rm`.
pub fn execute_remove(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut store = ctx.open_store()?;

    // Surface not-found before asking anything.
    store.get_secret(name)?;

    if !confirm(&format!("Remove secret '{name}'?"), force)? {
        output::info("Cancelled.");
        return Ok(());
    }

    store.remove_secret(name)?;
    ctx.save_store(&store)?;

    output::success(&format!("Removed secret '{name}'"));

    Ok(())
}
