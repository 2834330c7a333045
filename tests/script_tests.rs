//! Integration tests for script preparation and execution.

use passport::crypto::HostCryptoProvider;
use passport::errors::PassportError;
use passport::script::{interpolate, prepare, run_script_with_output, tokenize};
use passport::store::{ScriptEntry, Store};

fn crypto() -> HostCryptoProvider {
    HostCryptoProvider::with_machine_id("script-tests-host")
}

fn script(command: &str) -> ScriptEntry {
    ScriptEntry {
        name: "test".into(),
        command: command.into(),
    }
}

// ---------------------------------------------------------------------------
// Interpolation + tokenization
// ---------------------------------------------------------------------------

#[test]
fn interpolates_insecure_secret() {
    let mut store = Store::default();
    store.add_secret("token", "hi", false, &crypto()).unwrap();

    assert_eq!(
        interpolate("echo <secrets.token>", &store, &crypto()),
        "echo hi"
    );
}

#[test]
fn missing_secret_leaves_marker() {
    let store = Store::default();
    assert_eq!(
        interpolate("echo <secrets.token>", &store, &crypto()),
        "echo <secrets.token>"
    );
}

#[test]
fn tokenizes_quoted_argument() {
    assert_eq!(
        tokenize(r#"echo "hello world" foo"#).unwrap(),
        ["echo", "hello world", "foo"]
    );
    assert!(matches!(
        tokenize(r#"echo "unterminated"#),
        Err(PassportError::UnterminatedQuote(_))
    ));
}

#[test]
fn secret_with_spaces_stays_one_argument_when_quoted() {
    let mut store = Store::default();
    store
        .add_secret("greeting", "hello there", true, &crypto())
        .unwrap();

    let argv = prepare(
        &script(r#"printf "%s" "<secrets.greeting>""#),
        &store,
        &crypto(),
    )
    .unwrap();
    assert_eq!(argv, ["printf", "%s", "hello there"]);
}

#[test]
fn unterminated_quote_in_secret_value_aborts_before_spawn() {
    let mut store = Store::default();
    store.add_secret("bad", "it's", false, &crypto()).unwrap();

    assert!(matches!(
        prepare(&script("echo <secrets.bad>"), &store, &crypto()),
        Err(PassportError::UnterminatedQuote(_))
    ));
}

#[test]
fn quote_error_shows_template_not_secret_value() {
    let mut store = Store::default();
    store.add_secret("pw", "hunter2'", true, &crypto()).unwrap();

    let err = prepare(&script("login <secrets.pw>"), &store, &crypto()).unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, PassportError::UnterminatedQuote(ref c) if c == "login <secrets.pw>"));
    assert!(!message.contains("hunter2"));
}

// ---------------------------------------------------------------------------
// Execution (Unix shells only)
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn exit_code_is_returned_without_error() {
    let store = Store::default();
    let code = run_script_with_output(&script("sh -c 'exit 7'"), &store, &crypto(), Vec::new())
        .unwrap();
    assert_eq!(code, 7);
}

#[cfg(unix)]
#[test]
fn output_contains_interpolated_secret() {
    let mut store = Store::default();
    store.add_secret("token", "s3cr3t", true, &crypto()).unwrap();

    let mut out = Vec::new();
    let code = run_script_with_output(
        &script("echo token=<secrets.token>"),
        &store,
        &crypto(),
        &mut out,
    )
    .unwrap();

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "token=s3cr3t\n");
}

#[cfg(unix)]
#[test]
fn foreign_ciphertext_runs_with_empty_substitution() {
    let mut store = Store::default();
    let other_host = HostCryptoProvider::with_machine_id("someone-elses-laptop");
    store.add_secret("token", "s3cr3t", true, &other_host).unwrap();

    let mut out = Vec::new();
    let code = run_script_with_output(
        &script("echo [<secrets.token>]"),
        &store,
        &crypto(),
        &mut out,
    )
    .unwrap();

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
}

#[cfg(unix)]
#[test]
fn stderr_is_forwarded() {
    let store = Store::default();
    let mut out = Vec::new();

    run_script_with_output(
        &script("sh -c 'echo oops 1>&2; exit 3'"),
        &store,
        &crypto(),
        &mut out,
    )
    .unwrap();

    assert!(String::from_utf8(out).unwrap().contains("oops"));
}

#[test]
fn unknown_program_is_spawn_failure() {
    let store = Store::default();
    let result = run_script_with_output(
        &script("passport-test-missing-program --flag"),
        &store,
        &crypto(),
        Vec::new(),
    );
    assert!(matches!(result, Err(PassportError::SpawnFailed { .. })));
}
