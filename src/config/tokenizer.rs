//! Shell-style word splitting for `.rubocop` and `RUBOCOP_OPTS` content
//!
//! Follows POSIX shell quoting: unquoted whitespace separates words, single
//! quotes are fully literal, double quotes allow `\"`, `\\`, `\$` and `` \` ``
//! escapes, and a backslash outside quotes escapes the next character.
//! Adjacent quoted and unquoted pieces join into one word (`--out="a b"`).

use crate::domain::Origin;
use crate::error::{OptionsError, Result};

/// Split `raw` into argv-style tokens.
///
/// Empty or whitespace-only input yields no tokens. An unterminated quote is
/// a [`OptionsError::MalformedInput`] blamed on `origin`.
pub fn tokenize(raw: &str, origin: Origin) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    tokens.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(unterminated(origin, '\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\' | '$' | '`')) => current.push(c),
                            Some('\n') => {}
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(unterminated(origin, '"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(unterminated(origin, '"')),
                    }
                }
            }
            '\\' => match chars.next() {
                // Line continuation.
                Some('\n') => {}
                Some(c) => {
                    in_word = true;
                    current.push(c);
                }
                None => {
                    in_word = true;
                    current.push('\\');
                }
            },
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        tokens.push(current);
    }

    Ok(tokens)
}

fn unterminated(origin: Origin, quote: char) -> OptionsError {
    OptionsError::MalformedInput { origin, reason: format!("unmatched {} quote", quote_name(quote)) }
}

fn quote_name(quote: char) -> &'static str {
    if quote == '"' {
        "double"
    } else {
        "single"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn split(raw: &str) -> Vec<String> {
        tokenize(raw, Origin::Environment).expect("tokenize")
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(split("").is_empty());
        assert!(split("  \n\t ").is_empty());
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(split("--color\n--fail-level  C\t-P"), vec!["--color", "--fail-level", "C", "-P"]);
    }

    #[test]
    fn quotes_keep_whitespace() {
        assert_eq!(split(r#"--out "my report.txt" -r 'a b.rb'"#), vec![
            "--out",
            "my report.txt",
            "-r",
            "a b.rb"
        ]);
    }

    #[test]
    fn adjacent_pieces_join() {
        assert_eq!(split(r#"--out="a b"c"#), vec!["--out=a bc"]);
    }

    #[test]
    fn empty_quotes_produce_empty_token() {
        assert_eq!(split("-o ''"), vec!["-o", ""]);
    }

    #[test]
    fn backslash_escapes() {
        assert_eq!(split(r"a\ b"), vec!["a b"]);
        assert_eq!(split(r#""say \"hi\"""#), vec![r#"say "hi""#]);
        assert_eq!(split(r#""keep \n""#), vec![r"keep \n"]);
        assert_eq!(split("'no \\ escape'"), vec!["no \\ escape"]);
    }

    #[test]
    fn line_continuation_is_dropped() {
        assert_eq!(split("--only \\\nFoo"), vec!["--only", "Foo"]);
    }

    #[test]
    fn unmatched_quotes_are_malformed() {
        for raw in ["--out 'oops", "\"never closed", "ok \"still \\\" open"] {
            let err = tokenize(raw, Origin::ConfigFile).expect_err("should fail");
            assert_eq!(err.kind(), ErrorKind::MalformedInput, "{raw}");
        }
        let err = tokenize("'x", Origin::ConfigFile).expect_err("should fail");
        assert_eq!(err.to_string(), "malformed input in file source: unmatched single quote");
    }
}
