//! Script execution: interpolate secrets, split into argv, run.
//!
//! This module provides:
//! - `<secrets.NAME>` substitution (`interpolate`)
//! - Shell-style word splitting (`tokenize`)
//! - Child process execution with streamed output (`runner`)

pub mod interpolate;
pub mod runner;
pub mod tokenize;

use std::io::Write;

pub use interpolate::interpolate;
pub use tokenize::tokenize;

use crate::crypto::CryptoProvider;
use crate::errors::{PassportError, Result};
use crate::store::{ScriptEntry, Store};

/// Turn a script's command template into the argv that will be spawned.
///
/// Tokenization errors surface here, before anything is started. They
/// quote the script's template, never the interpolated command, so secret
/// values do not end up in diagnostics.
pub fn prepare(
    script: &ScriptEntry,
    store: &Store,
    crypto: &dyn CryptoProvider,
) -> Result<Vec<String>> {
    let command = interpolate(&script.command, store, crypto);
    tokenize(&command).map_err(|e| match e {
        PassportError::UnterminatedQuote(_) => {
            PassportError::UnterminatedQuote(script.command.clone())
        }
        other => other,
    })
}

/// Run a script, streaming its output to stdout, and return its exit code.
pub fn run_script(
    script: &ScriptEntry,
    store: &Store,
    crypto: &dyn CryptoProvider,
) -> Result<i32> {
    let argv = prepare(script, store, crypto)?;
    runner::run(&argv)
}

/// Like `run_script`, but copies the child's output into `sink`.
pub fn run_script_with_output<W: Write + Send>(
    script: &ScriptEntry,
    store: &Store,
    crypto: &dyn CryptoProvider,
    sink: W,
) -> Result<i32> {
    let argv = prepare(script, store, crypto)?;
    runner::run_with_output(&argv, sink)
}
