//! Error types for option resolution

use crate::domain::Origin;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of an [`OptionsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    UnknownOption,
    MissingArgument,
    ArgumentError,
    Io,
}

/// Every way resolving options can fail. The first failure aborts the run.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Unbalanced quoting in `.rubocop` or `RUBOCOP_OPTS` content.
    #[error("malformed input in {origin}: {reason}")]
    MalformedInput { origin: Origin, reason: String },

    #[error("invalid option: {0}")]
    UnknownOption(String),

    /// A long-option prefix matched more than one flag.
    #[error("ambiguous option: {0}")]
    AmbiguousOption(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// A value failed its flag's coercion rule.
    #[error("invalid argument: {flag} {value}")]
    InvalidArgument { flag: String, value: String },

    /// A constraint rule fired, or a source carried positionals it may not.
    #[error("{0}")]
    Argument(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OptionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionsError::MalformedInput { .. } => ErrorKind::MalformedInput,
            OptionsError::UnknownOption(_) | OptionsError::AmbiguousOption(_) => {
                ErrorKind::UnknownOption
            }
            OptionsError::MissingArgument(_) => ErrorKind::MissingArgument,
            OptionsError::InvalidArgument { .. } | OptionsError::Argument(_) => {
                ErrorKind::ArgumentError
            }
            OptionsError::Io { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, OptionsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_option_parser_wording() {
        assert_eq!(OptionsError::UnknownOption("--foo".into()).to_string(), "invalid option: --foo");
        assert_eq!(
            OptionsError::MissingArgument("--cache".into()).to_string(),
            "missing argument: --cache"
        );
        let err = OptionsError::InvalidArgument { flag: "--cache".into(), value: "maybe".into() };
        assert_eq!(err.to_string(), "invalid argument: --cache maybe");
        assert_eq!(err.kind(), ErrorKind::ArgumentError);
    }

    #[test]
    fn ambiguous_is_an_unknown_option() {
        assert_eq!(OptionsError::AmbiguousOption("--f".into()).kind(), ErrorKind::UnknownOption);
    }
}
