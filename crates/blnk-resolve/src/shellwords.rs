//! Minimal shell-word splitting and joining.
//!
//! Quotes group words the way a POSIX shell does. Outside quotes a
//! backslash is literal, so Windows separators survive splitting;
//! inside double quotes `\"` and `\\` are escapes.

use crate::error::{Error, Result};

/// Split a command line into words.
pub fn split(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '\'' {
                        closed = true;
                        break;
                    }
                    current.push(c);
                }
                if !closed {
                    return Err(Error::UnmatchedQuote {
                        input: input.to_string(),
                    });
                }
            }
            '"' => {
                in_word = true;
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' if matches!(chars.peek(), Some('"') | Some('\\')) => {
                            current.push(chars.next().unwrap());
                        }
                        _ => current.push(c),
                    }
                }
                if !closed {
                    return Err(Error::UnmatchedQuote {
                        input: input.to_string(),
                    });
                }
            }
            _ => {
                in_word = true;
                current.push(ch);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Join words back into one line, quoting where needed so that
/// `split(&join(words))` returns the same words.
pub fn join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| quote(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(word: &str) -> String {
    if !word.is_empty()
        && !word.contains(char::is_whitespace)
        && !word.contains(['"', '\''])
    {
        return word.to_string();
    }
    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for ch in word.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
