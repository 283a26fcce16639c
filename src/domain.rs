//! Core data types shared by the loader, parser, merger and validator

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Where a set of option tokens came from.
///
/// The declaration order is the precedence order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    ConfigFile,
    Environment,
    CommandLine,
}

impl Origin {
    /// Label used when a source is blamed in an error message.
    pub fn label(&self) -> &'static str {
        match self {
            Origin::ConfigFile => "file source",
            Origin::Environment => "environment source",
            Origin::CommandLine => "command line",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum severity that makes the run exit with an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Refactor,
    Convention,
    Warning,
    Error,
    Fatal,
    /// Pseudo-severity: fail whenever an offense was auto-corrected.
    Autocorrect,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Refactor => "refactor",
            Severity::Convention => "convention",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::Autocorrect => "autocorrect",
        }
    }

    /// Accepts full names, upper-case initials, and the `autocorrect`/`A` aliases.
    pub fn from_token(token: &str) -> Option<Self> {
        let severity = match token {
            "refactor" | "R" => Severity::Refactor,
            "convention" | "C" => Severity::Convention,
            "warning" | "W" => Severity::Warning,
            "error" | "E" => Severity::Error,
            "fatal" | "F" => Severity::Fatal,
            "autocorrect" | "A" => Severity::Autocorrect,
            _ => return None,
        };
        Some(severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `--format` selection, optionally redirected with `--out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// A typed option value after coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(u64),
    Text(String),
    Severity(Severity),
    /// Comma-delimited name list; empty means "all".
    List(Vec<String>),
    Formatters(Vec<FormatterSpec>),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Option values parsed from a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
    pub origin: Origin,
    pub values: BTreeMap<&'static str, OptionValue>,
    pub positionals: Vec<String>,
    /// Set when `-h/--help` was seen; parsing of the source stops there.
    pub help_requested: bool,
}

impl SourceResult {
    pub fn new(origin: Origin) -> Self {
        Self { origin, values: BTreeMap::new(), positionals: Vec::new(), help_requested: false }
    }
}

/// The merged and validated configuration handed to the analysis and
/// formatting layers. Only keys that some source set explicitly are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    values: BTreeMap<&'static str, OptionValue>,
    positionals: Vec<String>,
    #[serde(skip)]
    origins: BTreeMap<&'static str, Origin>,
}

impl ResolvedConfig {
    pub(crate) fn new(
        values: BTreeMap<&'static str, OptionValue>,
        positionals: Vec<String>,
        origins: BTreeMap<&'static str, Origin>,
    ) -> Self {
        Self { values, positionals, origins }
    }

    pub fn values(&self) -> &BTreeMap<&'static str, OptionValue> {
        &self.values
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// True when a boolean flag was set to `true` by some source.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    /// Explicit value if any source set it, else the flag's declared default.
    pub fn value_or_default(&self, key: &str) -> Option<OptionValue> {
        self.get(key).cloned().or_else(|| crate::schema::lookup_key(key)?.default_value())
    }

    pub fn origin_of(&self, key: &str) -> Option<Origin> {
        self.origins.get(key).copied()
    }

    pub fn fail_level(&self) -> Option<Severity> {
        match self.get("fail_level") {
            Some(OptionValue::Severity(s)) => Some(*s),
            _ => None,
        }
    }

    /// `Some(false)` only when caching was explicitly switched off.
    pub fn cache(&self) -> Option<bool> {
        self.get("cache").and_then(OptionValue::as_bool)
    }

    pub fn exclude_limit(&self) -> Option<u64> {
        match self.value_or_default("exclude_limit") {
            Some(OptionValue::Integer(n)) => Some(n),
            _ => None,
        }
    }

    pub fn formatters(&self) -> Vec<FormatterSpec> {
        match self.get(crate::schema::FORMATTERS_KEY) {
            Some(OptionValue::Formatters(list)) => list.clone(),
            _ => vec![FormatterSpec { name: crate::schema::DEFAULT_FORMATTER.to_string(), output: None }],
        }
    }
}

/// Result of a full resolution: either stop now with some text, or carry on
/// with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Terminate { code: i32, output: String },
    Continue(ResolvedConfig),
}
