//! Constraint rules
//!
//! ORDER MATTERS: when several rules could fire, the first in `RULES` is the
//! one reported.

use crate::domain::{OptionValue, ResolvedConfig};
use crate::error::OptionsError;

/// Flags that each select a terminal action, reported in this order.
const EXCLUSIVE_ACTIONS: &[&str] = &["version", "verbose_version", "show_cops"];

#[derive(Clone, Copy)]
pub struct ConstraintRule {
    pub name: &'static str,
    pub check: fn(&ResolvedConfig) -> Option<OptionsError>,
}

pub static RULES: &[ConstraintRule] = &[
    ConstraintRule { name: "exclusive_actions", check: exclusive_actions },
    ConstraintRule { name: "parallel_needs_cache", check: parallel_needs_cache },
    ConstraintRule { name: "parallel_auto_correct", check: parallel_auto_correct },
    ConstraintRule { name: "parallel_auto_gen_config", check: parallel_auto_gen_config },
    ConstraintRule { name: "parallel_fail_fast", check: parallel_fail_fast },
    ConstraintRule { name: "exclude_limit_needs_auto_gen", check: exclude_limit_needs_auto_gen },
    ConstraintRule { name: "stdin_single_path", check: stdin_single_path },
    ConstraintRule { name: "only_unneeded_disable", check: only_unneeded_disable },
];

fn argument(message: impl Into<String>) -> Option<OptionsError> {
    Some(OptionsError::Argument(message.into()))
}

fn exclusive_actions(config: &ResolvedConfig) -> Option<OptionsError> {
    let set: Vec<String> = EXCLUSIVE_ACTIONS
        .iter()
        .filter(|key| is_set(config, key))
        .map(|key| format!(":{key}"))
        .collect();
    if set.len() <= 1 {
        return None;
    }
    argument(format!("Incompatible cli options: [{}]", set.join(", ")))
}

/// A switch counts when it is on; any valued option counts when present.
fn is_set(config: &ResolvedConfig, key: &str) -> bool {
    match config.get(key) {
        Some(OptionValue::Bool(on)) => *on,
        Some(_) => true,
        None => false,
    }
}

fn parallel_needs_cache(config: &ResolvedConfig) -> Option<OptionsError> {
    if config.flag("parallel") && config.cache() == Some(false) {
        return argument(
            "-P/--parallel uses caching to speed up execution, so combining with --cache false \
             is not allowed.",
        );
    }
    None
}

fn parallel_auto_correct(config: &ResolvedConfig) -> Option<OptionsError> {
    if config.flag("parallel") && config.flag("auto_correct") {
        return argument("-P/--parallel can not be combined with --auto-correct.");
    }
    None
}

fn parallel_auto_gen_config(config: &ResolvedConfig) -> Option<OptionsError> {
    if config.flag("parallel") && config.flag("auto_gen_config") {
        return argument(
            "-P/--parallel uses caching to speed up execution, while --auto-gen-config needs a \
             non-cached run, so they cannot be combined.",
        );
    }
    None
}

fn parallel_fail_fast(config: &ResolvedConfig) -> Option<OptionsError> {
    if config.flag("parallel") && config.flag("fail_fast") {
        return argument("-P/--parallel can not be combined with -F/--fail-fast.");
    }
    None
}

fn exclude_limit_needs_auto_gen(config: &ResolvedConfig) -> Option<OptionsError> {
    if config.contains("exclude_limit") && !config.flag("auto_gen_config") {
        return argument("--exclude-limit can only be used with --auto-gen-config.");
    }
    None
}

fn stdin_single_path(config: &ResolvedConfig) -> Option<OptionsError> {
    if !config.contains("stdin") {
        return None;
    }
    match config.positionals().len() {
        0 => Some(OptionsError::MissingArgument("-s/--stdin".to_string())),
        1 => None,
        _ => argument("-s/--stdin requires exactly one path."),
    }
}

fn only_unneeded_disable(config: &ResolvedConfig) -> Option<OptionsError> {
    let Some(OptionValue::List(cops)) = config.get("only") else {
        return None;
    };
    if cops.iter().any(|cop| cop == "Lint/UnneededDisable" || cop == "UnneededDisable") {
        return argument("Lint/UnneededDisable can not be used with --only.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Origin, SourceResult};
    use crate::schema::parse_tokens;

    fn config(args: &[&str]) -> ResolvedConfig {
        let tokens: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let parsed = parse_tokens(Origin::CommandLine, &tokens).expect("parse");
        crate::config::merge(parsed, None, None)
    }

    fn fired(rule: fn(&ResolvedConfig) -> Option<OptionsError>, args: &[&str]) -> Option<String> {
        rule(&config(args)).map(|err| err.to_string())
    }

    #[test]
    fn exclusive_actions_list_in_canonical_order() {
        assert_eq!(
            fired(exclusive_actions, &["--show-cops", "-V", "-v"]).as_deref(),
            Some("Incompatible cli options: [:version, :verbose_version, :show_cops]")
        );
        assert_eq!(
            fired(exclusive_actions, &["-V", "--show-cops"]).as_deref(),
            Some("Incompatible cli options: [:verbose_version, :show_cops]")
        );
        assert_eq!(fired(exclusive_actions, &["-v"]), None);
    }

    #[test]
    fn parallel_rules_fire_independently() {
        assert!(fired(parallel_needs_cache, &["-P", "--cache", "false"]).is_some());
        assert!(fired(parallel_needs_cache, &["-P", "--cache", "true"]).is_none());
        assert!(fired(parallel_needs_cache, &["-P"]).is_none());
        assert!(fired(parallel_auto_correct, &["-P", "-a"]).is_some());
        assert!(fired(parallel_auto_gen_config, &["-P", "--auto-gen-config"]).is_some());
        assert!(fired(parallel_fail_fast, &["-P", "-F"]).is_some());
        assert!(fired(parallel_fail_fast, &["-F"]).is_none());
    }

    #[test]
    fn exclude_limit_requires_auto_gen_config() {
        assert!(fired(exclude_limit_needs_auto_gen, &["--exclude-limit", "10"]).is_some());
        assert!(fired(exclude_limit_needs_auto_gen, &["--exclude-limit", "10", "--auto-gen-config"])
            .is_none());
    }

    #[test]
    fn stdin_arity() {
        assert!(fired(stdin_single_path, &["--stdin", "foo"]).is_none());
        assert_eq!(
            fired(stdin_single_path, &["--stdin", "foo", "bar"]).as_deref(),
            Some("-s/--stdin requires exactly one path.")
        );

        let mut cli = SourceResult::new(Origin::CommandLine);
        cli.values.insert("stdin", OptionValue::Text("foo".into()));
        let err = stdin_single_path(&crate::config::merge(cli, None, None)).expect("fires");
        assert_eq!(err.kind(), crate::error::ErrorKind::MissingArgument);
    }

    #[test]
    fn only_rejects_unneeded_disable() {
        assert!(fired(only_unneeded_disable, &["--only", "Style/Foo,Lint/UnneededDisable"]).is_some());
        assert!(fired(only_unneeded_disable, &["--only", "Style/Foo"]).is_none());
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
