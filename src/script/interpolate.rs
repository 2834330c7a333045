//! `<secrets.NAME>` substitution in command templates.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::crypto::CryptoProvider;
use crate::store::Store;

/// How many times one marker may be expanded before it is left as written.
const MAX_EXPANSIONS: usize = 8;

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<secrets\.([a-zA-Z0-9_-]+)>").expect("secret marker pattern is valid")
    })
}

/// Replace every `<secrets.NAME>` marker in `template` with the
/// plaintext of secret `NAME`, repeating until no resolvable marker is left.
///
/// Markers naming an unknown secret stay in the text as written.  A
/// secure secret that cannot be decrypted is substituted as empty text.
/// A marker expanded `MAX_EXPANSIONS` times is left in place, which
/// bounds self-referential and cyclic values.
pub fn interpolate(template: &str, store: &Store, crypto: &dyn CryptoProvider) -> String {
    let pattern = marker_pattern();
    let mut text = template.to_string();
    let mut settled: HashSet<String> = HashSet::new();
    let mut expansions: HashMap<String, usize> = HashMap::new();

    loop {
        let next = pattern
            .captures_iter(&text)
            .find(|caps| !settled.contains(&caps[0]))
            .map(|caps| (caps[0].to_string(), caps[1].to_string()));

        let Some((marker, name)) = next else {
            break;
        };

        match store.get_secret(&name) {
            Ok(entry) => {
                tracing::debug!(secret = %name, "interpolating secret");
                text = text.replace(&marker, &entry.resolve_value(crypto));

                let count = expansions.entry(marker.clone()).or_insert(0);
                *count += 1;
                if *count >= MAX_EXPANSIONS {
                    tracing::warn!(
                        secret = %name,
                        "secret keeps expanding to itself, leaving marker"
                    );
                    settled.insert(marker);
                }
            }
            Err(_) => {
                tracing::debug!(secret = %name, "no such secret, leaving marker");
                settled.insert(marker);
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HostCryptoProvider;

    fn crypto() -> HostCryptoProvider {
        HostCryptoProvider::with_machine_id("interpolate-tests")
    }

    fn store_with(secrets: &[(&str, &str)]) -> Store {
        let mut store = Store::default();
        for (name, value) in secrets {
            store.add_secret(name, value, false, &crypto()).unwrap();
        }
        store
    }

    #[test]
    fn replaces_known_secret() {
        let store = store_with(&[("token", "hi")]);
        assert_eq!(
            interpolate("echo <secrets.token>", &store, &crypto()),
            "echo hi"
        );
    }

    #[test]
    fn leaves_unknown_secret_in_place() {
        let store = Store::default();
        assert_eq!(
            interpolate("echo <secrets.token>", &store, &crypto()),
            "echo <secrets.token>"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let store = store_with(&[("user", "bob")]);
        assert_eq!(
            interpolate("<secrets.user>:<secrets.user>", &store, &crypto()),
            "bob:bob"
        );
    }

    #[test]
    fn resolves_after_an_unknown_marker() {
        let store = store_with(&[("b", "2")]);
        assert_eq!(
            interpolate("<secrets.a> <secrets.b> <secrets.a>", &store, &crypto()),
            "<secrets.a> 2 <secrets.a>"
        );
    }

    #[test]
    fn identifiers_allow_dash_and_underscore() {
        let store = store_with(&[("api-key_2", "k")]);
        assert_eq!(
            interpolate("curl -H <secrets.api-key_2>", &store, &crypto()),
            "curl -H k"
        );
    }

    #[test]
    fn invalid_identifiers_are_not_markers() {
        let store = store_with(&[("a", "1")]);
        assert_eq!(
            interpolate("<secrets.a.b> <secrets.> <secret.a>", &store, &crypto()),
            "<secrets.a.b> <secrets.> <secret.a>"
        );
    }

    #[test]
    fn values_can_introduce_further_markers() {
        let store = store_with(&[("outer", "<secrets.inner>"), ("inner", "x")]);
        assert_eq!(interpolate("<secrets.outer>", &store, &crypto()), "x");
    }

    #[test]
    fn marker_reintroduced_by_a_later_value_is_resolved() {
        let store = store_with(&[("a", "1"), ("b", "<secrets.a>")]);
        assert_eq!(
            interpolate("<secrets.a> <secrets.b>", &store, &crypto()),
            "1 1"
        );
    }

    #[test]
    fn self_referencing_value_terminates() {
        let store = store_with(&[("loop", "<secrets.loop>!")]);
        let expected = format!("<secrets.loop>{}", "!".repeat(MAX_EXPANSIONS));
        assert_eq!(interpolate("<secrets.loop>", &store, &crypto()), expected);
    }

    #[test]
    fn cyclic_values_terminate() {
        let store = store_with(&[("a", "<secrets.b>"), ("b", "<secrets.a>")]);
        let out = interpolate("<secrets.a>", &store, &crypto());
        assert!(out == "<secrets.a>" || out == "<secrets.b>");
    }

    #[test]
    fn undecryptable_secret_becomes_empty() {
        let mut store = Store::default();
        let foreign = HostCryptoProvider::with_machine_id("some-other-host");
        store.add_secret("token", "hi", true, &foreign).unwrap();

        assert_eq!(
            interpolate("echo <secrets.token>", &store, &crypto()),
            "echo "
        );
    }
}
