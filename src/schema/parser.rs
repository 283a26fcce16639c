//! Per-source parsing of an argument vector against the flag table

use clap_lex::{ArgCursor, RawArgs};
use std::collections::btree_map::Entry;
use tracing::{debug, trace};

use super::{
    lookup_long, lookup_short, Arity, Coercion, FlagSpec, LongMatch, LookupError, FORMATTERS_KEY,
};
use crate::domain::{FormatterSpec, OptionValue, Origin, Severity, SourceResult};
use crate::error::{OptionsError, Result};

/// Parse `tokens` left to right into a [`SourceResult`] for `origin`.
///
/// Non-flag tokens anywhere become positionals, as does everything after a
/// bare `--`. Parsing stops early at `-h/--help`.
pub fn parse_tokens(origin: Origin, tokens: &[String]) -> Result<SourceResult> {
    let raw = RawArgs::new(tokens.iter().map(String::as_str));
    let mut cursor = raw.cursor();
    let mut result = SourceResult::new(origin);

    while let Some(arg) = raw.next(&mut cursor) {
        if arg.is_escape() {
            let rest = raw.remaining(&mut cursor).map(|os| os.to_string_lossy().into_owned());
            result.positionals.extend(rest);
            break;
        }

        if arg.is_stdio() {
            result.positionals.push("-".to_string());
            continue;
        }

        if let Some((name, inline)) = arg.to_long() {
            let name = name.map_err(|os| {
                OptionsError::UnknownOption(format!("--{}", os.to_string_lossy()))
            })?;
            let written = format!("--{name}");
            let found = lookup_long(name).map_err(|err| match err {
                LookupError::Unknown => OptionsError::UnknownOption(written.clone()),
                LookupError::Ambiguous => OptionsError::AmbiguousOption(written.clone()),
            })?;
            let inline = inline.map(|os| os.to_string_lossy().into_owned());

            let flow = match found {
                LongMatch::Negated(spec) => {
                    if let Some(value) = inline {
                        return Err(OptionsError::InvalidArgument { flag: written, value });
                    }
                    set(&mut result, spec, OptionValue::Bool(false));
                    Flow::Continue
                }
                LongMatch::Set(spec) => {
                    let value = match (spec.arity, inline) {
                        (Arity::None, Some(value)) => {
                            return Err(OptionsError::InvalidArgument { flag: written, value });
                        }
                        (_, Some(value)) => Some(value),
                        (Arity::None, None) => None,
                        (_, None) => take_value(&raw, &mut cursor),
                    };
                    apply(&mut result, spec, &written, value)?
                }
            };
            if flow == Flow::Stop {
                break;
            }
            continue;
        }

        if let Some(mut shorts) = arg.to_short() {
            let mut flow = Flow::Continue;
            while let Some(flag) = shorts.next_flag() {
                let c = flag.map_err(|os| {
                    OptionsError::UnknownOption(format!("-{}", os.to_string_lossy()))
                })?;
                let written = format!("-{c}");
                let spec = lookup_short(c).ok_or_else(|| OptionsError::UnknownOption(written.clone()))?;

                if spec.arity == Arity::None {
                    flow = apply(&mut result, spec, &written, None)?;
                    if flow == Flow::Stop {
                        break;
                    }
                    continue;
                }

                // The rest of the cluster, if any, is the value: `-fj`.
                let value = match shorts.next_value_os() {
                    Some(rest) if !rest.is_empty() => Some(rest.to_string_lossy().into_owned()),
                    _ => take_value(&raw, &mut cursor),
                };
                flow = apply(&mut result, spec, &written, value)?;
                break;
            }
            if flow == Flow::Stop {
                break;
            }
            continue;
        }

        result.positionals.push(arg.to_value_os().to_string_lossy().into_owned());
    }

    debug!(
        origin = %origin,
        keys = ?result.values.keys().collect::<Vec<_>>(),
        positionals = result.positionals.len(),
        "parsed option source"
    );

    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Consume the next token as a value unless it looks like another flag.
fn take_value(raw: &RawArgs, cursor: &mut ArgCursor) -> Option<String> {
    let next = raw.peek(cursor)?;
    let text = next.to_value_os().to_string_lossy().into_owned();
    if text.starts_with('-') && text != "-" {
        return None;
    }
    raw.next(cursor);
    Some(text)
}

fn set(result: &mut SourceResult, spec: &'static FlagSpec, value: OptionValue) {
    trace!(key = spec.key, value = ?value, "set option");
    result.values.insert(spec.key, value);
}

fn apply(
    result: &mut SourceResult,
    spec: &'static FlagSpec,
    written: &str,
    value: Option<String>,
) -> Result<Flow> {
    let required =
        |value: Option<String>| value.ok_or_else(|| OptionsError::MissingArgument(written.to_string()));
    let invalid = |value: String| OptionsError::InvalidArgument { flag: written.to_string(), value };

    match spec.coercion {
        Coercion::Help => {
            result.help_requested = true;
            return Ok(Flow::Stop);
        }
        Coercion::Switch => set(result, spec, OptionValue::Bool(true)),
        Coercion::CopList => {
            let cops = value.as_deref().map(split_list).unwrap_or_default();
            set(result, spec, OptionValue::List(cops));
        }
        Coercion::Text => set(result, spec, OptionValue::Text(required(value)?)),
        Coercion::Integer => {
            let value = required(value)?;
            let n = value.parse::<u64>().map_err(|_| invalid(value.clone()))?;
            set(result, spec, OptionValue::Integer(n));
        }
        Coercion::Severity => {
            let value = required(value)?;
            let severity = Severity::from_token(&value).ok_or_else(|| invalid(value.clone()))?;
            set(result, spec, OptionValue::Severity(severity));
        }
        Coercion::CacheLiteral => {
            let value = required(value)?;
            let enabled = match value.as_str() {
                "true" => true,
                "false" => false,
                _ => return Err(invalid(value)),
            };
            set(result, spec, OptionValue::Bool(enabled));
        }
        Coercion::Formatter => {
            let name = required(value)?;
            update_formatters(result, |list| list.push(FormatterSpec { name, output: None }));
        }
        Coercion::Output => {
            let path = required(value)?;
            update_formatters(result, |list| match list.last_mut() {
                Some(last) => last.output = Some(path),
                None => list.push(FormatterSpec {
                    name: super::DEFAULT_FORMATTER.to_string(),
                    output: Some(path),
                }),
            });
        }
        Coercion::Require => {
            let file = required(value)?;
            match result.values.entry(spec.key) {
                Entry::Occupied(mut slot) => {
                    if let OptionValue::List(files) = slot.get_mut() {
                        files.push(file);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(OptionValue::List(vec![file]));
                }
            }
        }
        Coercion::Stdin => {
            let path = required(value)?;
            result.positionals.push(path.clone());
            set(result, spec, OptionValue::Text(path));
        }
    }

    Ok(Flow::Continue)
}

/// `--format` and `--out` both edit the one formatter list.
fn update_formatters(result: &mut SourceResult, edit: impl FnOnce(&mut Vec<FormatterSpec>)) {
    let mut list = match result.values.remove(FORMATTERS_KEY) {
        Some(OptionValue::Formatters(list)) => list,
        _ => Vec::new(),
    };
    edit(&mut list);
    trace!(key = FORMATTERS_KEY, value = ?list, "set option");
    result.values.insert(FORMATTERS_KEY, OptionValue::Formatters(list));
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|part| !part.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<SourceResult> {
        let tokens: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_tokens(Origin::CommandLine, &tokens)
    }

    fn kind(args: &[&str]) -> ErrorKind {
        parse(args).expect_err("parse should fail").kind()
    }

    #[test]
    fn switches_and_negation() {
        let parsed = parse(&["--color", "--no-color", "-P"]).expect("parse");
        assert_eq!(parsed.values.get("color"), Some(&OptionValue::Bool(false)));
        assert_eq!(parsed.values.get("parallel"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn clustered_shorts() {
        let parsed = parse(&["-vV"]).expect("parse");
        assert_eq!(parsed.values.get("version"), Some(&OptionValue::Bool(true)));
        assert_eq!(parsed.values.get("verbose_version"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn cluster_remainder_is_a_value() {
        let parsed = parse(&["-Dfj"]).expect("parse");
        assert_eq!(
            parsed.values.get("formatters"),
            Some(&OptionValue::Formatters(vec![FormatterSpec { name: "j".into(), output: None }]))
        );
    }

    #[test]
    fn fail_level_accepts_every_spelling() {
        for token in
            ["refactor", "convention", "warning", "error", "fatal", "R", "C", "W", "E", "F", "autocorrect", "A"]
        {
            parse(&["--fail-level", token]).unwrap_or_else(|e| panic!("{token}: {e}"));
        }
        assert_eq!(kind(&["--fail-level", "info"]), ErrorKind::ArgumentError);
        assert_eq!(kind(&["--fail-level", "c"]), ErrorKind::ArgumentError);
    }

    #[test]
    fn cache_literals() {
        let parsed = parse(&["--cache", "false"]).expect("parse");
        assert_eq!(parsed.values.get("cache"), Some(&OptionValue::Bool(false)));
        parse(&["-C", "true"]).expect("parse");
        assert_eq!(kind(&["--cache"]), ErrorKind::MissingArgument);
        assert_eq!(kind(&["--cache", "maybe"]), ErrorKind::ArgumentError);
        let err = parse(&["--cache=yes"]).expect_err("invalid");
        assert_eq!(err.to_string(), "invalid argument: --cache yes");
    }

    #[test]
    fn valued_flag_refuses_a_following_flag() {
        assert_eq!(kind(&["--exclude-limit"]), ErrorKind::MissingArgument);
        assert_eq!(kind(&["--exclude-limit", "--auto-gen-config"]), ErrorKind::MissingArgument);
        assert_eq!(kind(&["--auto-gen-config", "--exclude-limit"]), ErrorKind::MissingArgument);
        assert_eq!(kind(&["--exclude-limit", "ten"]), ErrorKind::ArgumentError);
    }

    #[test]
    fn cop_lists_split_on_commas() {
        let parsed = parse(&["--only", "Style/Foo, Lint/Bar", "--show-cops"]).expect("parse");
        assert_eq!(
            parsed.values.get("only"),
            Some(&OptionValue::List(vec!["Style/Foo".into(), "Lint/Bar".into()]))
        );
        // No value means every cop.
        assert_eq!(parsed.values.get("show_cops"), Some(&OptionValue::List(vec![])));
    }

    #[test]
    fn list_all_when_followed_by_flag() {
        let parsed = parse(&["--show-cops", "-D"]).expect("parse");
        assert_eq!(parsed.values.get("show_cops"), Some(&OptionValue::List(vec![])));
        assert_eq!(parsed.values.get("display_cop_names"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn out_attaches_to_previous_format() {
        let parsed = parse(&["-o", "a.txt", "-f", "json", "--out=b.json", "-f", "s"]).expect("parse");
        assert_eq!(
            parsed.values.get("formatters"),
            Some(&OptionValue::Formatters(vec![
                FormatterSpec { name: "progress".into(), output: Some("a.txt".into()) },
                FormatterSpec { name: "json".into(), output: Some("b.json".into()) },
                FormatterSpec { name: "s".into(), output: None },
            ]))
        );
    }

    #[test]
    fn out_records_under_the_formatter_list() {
        let parsed = parse(&["--out", "report.txt"]).expect("parse");
        assert!(!parsed.values.contains_key("out"));
        assert_eq!(
            parsed.values.get(FORMATTERS_KEY),
            Some(&OptionValue::Formatters(vec![FormatterSpec {
                name: "progress".into(),
                output: Some("report.txt".into()),
            }]))
        );
    }

    #[test]
    fn require_accumulates() {
        let parsed = parse(&["-r", "a.rb", "--require", "b.rb"]).expect("parse");
        assert_eq!(
            parsed.values.get("require"),
            Some(&OptionValue::List(vec!["a.rb".into(), "b.rb".into()]))
        );
    }

    #[test]
    fn positionals_and_escape() {
        let parsed = parse(&["lib", "-P", "-", "--", "--color", "x.rb"]).expect("parse");
        assert_eq!(parsed.positionals, vec!["lib", "-", "--color", "x.rb"]);
        assert!(!parsed.values.contains_key("color"));
    }

    #[test]
    fn stdin_path_is_positional() {
        let parsed = parse(&["--stdin", "foo.rb"]).expect("parse");
        assert_eq!(parsed.positionals, vec!["foo.rb"]);
        assert_eq!(kind(&["-s"]), ErrorKind::MissingArgument);
    }

    #[test]
    fn unknown_and_ambiguous_options() {
        let err = parse(&["--frobnicate"]).expect_err("unknown");
        assert_eq!(err.to_string(), "invalid option: --frobnicate");
        let err = parse(&["-x"]).expect_err("unknown");
        assert_eq!(err.to_string(), "invalid option: -x");
        let err = parse(&["--f"]).expect_err("ambiguous");
        assert_eq!(err.to_string(), "ambiguous option: --f");
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
    }

    #[test]
    fn switch_rejects_inline_value() {
        assert_eq!(kind(&["--parallel=yes"]), ErrorKind::ArgumentError);
        assert_eq!(kind(&["--no-color=1"]), ErrorKind::ArgumentError);
    }

    #[test]
    fn help_stops_parsing() {
        let parsed = parse(&["-P", "--help", "--bogus"]).expect("parse");
        assert!(parsed.help_requested);
        assert_eq!(parsed.values.get("parallel"), Some(&OptionValue::Bool(true)));
    }
}
