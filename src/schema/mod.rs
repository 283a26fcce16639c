//! Option schema
//!
//! `FLAGS` is declared in help-listing order.

use crate::domain::OptionValue;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod parser;

pub use parser::parse_tokens;

/// Where `--format` and `--out` record the formatter list.
pub const FORMATTERS_KEY: &str = "formatters";

/// Formatter used when no `--format` is given.
pub const DEFAULT_FORMATTER: &str = "progress";

/// Builtin formatters as `(short key, full name)`; any other `--format`
/// value is passed through as a custom formatter class name.
pub const BUILTIN_FORMATTERS: &[(&str, &str)] = &[
    ("p", "progress"),
    ("s", "simple"),
    ("c", "clang"),
    ("d", "disabled cops via inline comments"),
    ("fu", "fuubar"),
    ("e", "emacs"),
    ("j", "json"),
    ("h", "html"),
    ("fi", "files"),
    ("o", "offenses"),
    ("w", "worst"),
    ("t", "tap"),
];

/// How many tokens a flag consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Boolean switch.
    None,
    /// Exactly one following token.
    One,
    /// An optional comma-delimited list; absent means "all".
    Variadic,
}

/// How a flag's token becomes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Switch,
    Text,
    Integer,
    Severity,
    /// Only the literals `true` and `false`.
    CacheLiteral,
    CopList,
    /// Appends to the formatter list.
    Formatter,
    /// Redirects the most recent formatter.
    Output,
    /// Appends to the required-file list.
    Require,
    /// Records the reporting path as a positional too.
    Stdin,
    /// Stops parsing and asks for the help text.
    Help,
}

#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub key: &'static str,
    pub short: Option<char>,
    pub long: &'static str,
    pub arity: Arity,
    pub coercion: Coercion,
    /// Also accepts `--no-<long>`.
    pub negatable: bool,
    pub value_name: Option<&'static str>,
    pub default: Option<OptionValue>,
    /// Help description lines; empty keeps the flag out of the listing.
    pub help: &'static [&'static str],
}

impl FlagSpec {
    fn switch(key: &'static str, short: Option<char>, long: &'static str) -> Self {
        Self {
            key,
            short,
            long,
            arity: Arity::None,
            coercion: Coercion::Switch,
            negatable: false,
            value_name: None,
            default: Some(OptionValue::Bool(false)),
            help: &[],
        }
    }

    fn valued(
        key: &'static str,
        short: Option<char>,
        long: &'static str,
        value_name: &'static str,
        coercion: Coercion,
    ) -> Self {
        Self {
            key,
            short,
            long,
            arity: Arity::One,
            coercion,
            negatable: false,
            value_name: Some(value_name),
            default: None,
            help: &[],
        }
    }

    fn cop_list(key: &'static str, long: &'static str) -> Self {
        Self {
            arity: Arity::Variadic,
            value_name: Some("[COP1,COP2,...]"),
            ..Self::valued(key, None, long, "", Coercion::CopList)
        }
    }

    fn help(mut self, lines: &'static [&'static str]) -> Self {
        self.help = lines;
        self
    }

    pub fn default_value(&self) -> Option<OptionValue> {
        self.default.clone()
    }

    /// The spelling shown in help and errors, e.g. `--[no-]color` or
    /// `--cache FLAG`.
    pub fn long_display(&self) -> String {
        let long = if self.negatable {
            format!("--[no-]{}", self.long)
        } else {
            format!("--{}", self.long)
        };
        match self.value_name {
            Some(name) => format!("{long} {name}"),
            None => long,
        }
    }
}

pub static FLAGS: Lazy<Vec<FlagSpec>> = Lazy::new(|| {
    use Coercion::*;

    vec![
        FlagSpec::switch("list_target_files", Some('L'), "list-target-files")
            .help(&["List all files RuboCop will inspect."]),
        FlagSpec::cop_list("except", "except").help(&["Disable the given cop(s)."]),
        FlagSpec::cop_list("only", "only").help(&["Run only the given cop(s)."]),
        FlagSpec::switch("only_guide_cops", None, "only-guide-cops")
            .help(&["Run only cops for rules that link to a", "style guide."]),
        FlagSpec::valued("config", Some('c'), "config", "FILE", Text)
            .help(&["Specify configuration file."]),
        FlagSpec::switch("auto_gen_config", None, "auto-gen-config")
            .help(&["Generate a configuration file acting as a", "TODO list."]),
        FlagSpec {
            default: Some(OptionValue::Integer(15)),
            ..FlagSpec::valued("exclude_limit", None, "exclude-limit", "COUNT", Integer)
        }
        .help(&[
            "Used together with --auto-gen-config to",
            "set the limit for how many Exclude",
            "properties to generate. Default is 15.",
        ]),
        FlagSpec::switch("force_exclusion", None, "force-exclusion").help(&[
            "Force excluding files specified in the",
            "configuration `Exclude` even if they are",
            "explicitly passed as arguments.",
        ]),
        FlagSpec::switch("ignore_parent_exclusion", None, "ignore-parent-exclusion")
            .help(&["Prevent from inheriting AllCops/Exclude from", "parent folders."]),
        FlagSpec::switch("force_default_config", None, "force-default-config").help(&[
            "Use default configuration even if configuration",
            "files are present in the directory tree.",
        ]),
        FlagSpec::switch("no_offense_counts", None, "no-offense-counts").help(&[
            "Do not include offense counts in configuration",
            "file generated by --auto-gen-config.",
        ]),
        FlagSpec::valued(FORMATTERS_KEY, Some('f'), "format", "FORMATTER", Formatter).help(&[
            "Choose an output formatter. This option",
            "can be specified multiple times to enable",
            "multiple formatters at the same time.",
        ]),
        FlagSpec::valued("out", Some('o'), "out", "FILE", Output).help(&[
            "Write output to a file instead of STDOUT.",
            "This option applies to the previously",
            "specified --format, or the default format",
            "if no format is specified.",
        ]),
        FlagSpec::valued("require", Some('r'), "require", "FILE", Require)
            .help(&["Require Ruby file."]),
        FlagSpec::valued("fail_level", None, "fail-level", "SEVERITY", Severity)
            .help(&["Minimum severity (A/R/C/W/E/F) for exit", "with error code."]),
        FlagSpec::cop_list("show_cops", "show-cops").help(&[
            "Shows the given cops, or all cops by",
            "default, and their configurations for the",
            "current directory.",
        ]),
        FlagSpec::switch("fail_fast", Some('F'), "fail-fast").help(&[
            "Inspect files in order of modification",
            "time and stop after the first file",
            "containing offenses.",
        ]),
        FlagSpec::valued("cache", Some('C'), "cache", "FLAG", CacheLiteral).help(&[
            "Use result caching (FLAG=true) or don't",
            "(FLAG=false), default determined by",
            "configuration parameter AllCops: UseCache.",
        ]),
        FlagSpec::switch("debug", Some('d'), "debug").help(&["Display debug info."]),
        FlagSpec::switch("display_cop_names", Some('D'), "display-cop-names")
            .help(&["Display cop names in offense messages."]),
        FlagSpec::switch("extra_details", Some('E'), "extra-details")
            .help(&["Display extra details in offense messages."]),
        FlagSpec::switch("display_style_guide", Some('S'), "display-style-guide")
            .help(&["Display style guide URLs in offense messages."]),
        FlagSpec::switch("rails", Some('R'), "rails").help(&["Run extra Rails cops."]),
        FlagSpec::switch("lint", Some('l'), "lint").help(&["Run only lint cops."]),
        FlagSpec::switch("auto_correct", Some('a'), "auto-correct")
            .help(&["Auto-correct offenses."]),
        FlagSpec { negatable: true, default: None, ..FlagSpec::switch("color", None, "color") }
            .help(&["Force color output on or off."]),
        FlagSpec::switch("version", Some('v'), "version").help(&["Display version."]),
        FlagSpec::switch("verbose_version", Some('V'), "verbose-version")
            .help(&["Display verbose version."]),
        FlagSpec::switch("parallel", Some('P'), "parallel").help(&[
            "Use available CPUs to execute inspection in",
            "parallel.",
        ]),
        FlagSpec::valued("stdin", Some('s'), "stdin", "FILE", Stdin).help(&[
            "Pipe source from STDIN, using FILE in offense",
            "reports. This is useful for editor integration.",
        ]),
        FlagSpec {
            coercion: Help,
            default: None,
            ..FlagSpec::switch("help", Some('h'), "help")
        },
    ]
});

static BY_SHORT: Lazy<HashMap<char, &'static FlagSpec>> = Lazy::new(|| {
    FLAGS.iter().filter_map(|spec| spec.short.map(|c| (c, spec))).collect()
});

/// Every accepted long spelling (without the leading `--`).
static LONG_FORMS: Lazy<Vec<(String, LongMatch)>> = Lazy::new(|| {
    let mut forms = Vec::new();
    for spec in FLAGS.iter() {
        forms.push((spec.long.to_string(), LongMatch::Set(spec)));
        if spec.negatable {
            forms.push((format!("no-{}", spec.long), LongMatch::Negated(spec)));
        }
    }
    forms
});

/// A long option resolved to its flag, with polarity.
#[derive(Debug, Clone, Copy)]
pub enum LongMatch {
    Set(&'static FlagSpec),
    Negated(&'static FlagSpec),
}

impl LongMatch {
    pub fn spec(&self) -> &'static FlagSpec {
        match self {
            LongMatch::Set(spec) | LongMatch::Negated(spec) => spec,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    Unknown,
    Ambiguous,
}

pub fn lookup_short(c: char) -> Option<&'static FlagSpec> {
    BY_SHORT.get(&c).copied()
}

/// Resolve a long option name. An exact spelling wins; otherwise any
/// unambiguous prefix of one spelling is accepted.
pub fn lookup_long(name: &str) -> Result<LongMatch, LookupError> {
    if let Some((_, found)) = LONG_FORMS.iter().find(|(form, _)| form == name) {
        return Ok(*found);
    }

    let mut candidates = LONG_FORMS.iter().filter(|(form, _)| form.starts_with(name));
    match (candidates.next(), candidates.next()) {
        (Some((_, found)), None) if !name.is_empty() => Ok(*found),
        (Some(_), Some(_)) => Err(LookupError::Ambiguous),
        _ => Err(LookupError::Unknown),
    }
}

/// The first flag declared under `key`.
pub fn lookup_key(key: &str) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|spec| spec.key == key)
}
