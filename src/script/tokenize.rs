//! Shell-style word splitting for script commands.
//!
//! Rules:
//! - spaces and tabs separate words outside quotes;
//! - `'...'` and `"..."` keep whitespace literal and join with any
//!   adjacent unquoted text (`a"b c"d` is the single word `ab cd`);
//! - outside quotes a backslash makes the next character literal;
//! - inside double quotes a backslash escapes only `"` and `\`;
//! - inside single quotes nothing is special.

use crate::errors::{PassportError, Result};

/// Split `command` into an argument vector.
///
/// The result is never empty: blank input is `EmptyCommand` and an
/// open quote at end of input is `UnterminatedQuote`.
pub fn tokenize(command: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    // Set once a quote pair has been seen, so `""` still yields a word.
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            Some(q) => {
                if c == q {
                    quote = None;
                } else if c == '\\' && matches!(chars.peek(), Some('"') | Some('\\')) {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                } else {
                    current.push(c);
                }
            }
            None => match c {
                ' ' | '\t' => {
                    if in_word {
                        args.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                '\\' => {
                    in_word = true;
                    // A trailing backslash is kept as-is.
                    current.push(chars.next().unwrap_or('\\'));
                }
                '"' | '\'' => {
                    in_word = true;
                    quote = Some(c);
                }
                _ => {
                    in_word = true;
                    current.push(c);
                }
            },
        }
    }

    if quote.is_some() {
        return Err(PassportError::UnterminatedQuote(command.to_string()));
    }

    if in_word {
        args.push(current);
    }

    if args.is_empty() {
        return Err(PassportError::EmptyCommand);
    }

    Ok(args)
}
