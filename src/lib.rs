//! rubocop-options: layered option resolution for the rubocop command line
//!
//! Options come from three places, lowest precedence first: a `.rubocop`
//! file in the working directory, the `RUBOCOP_OPTS` environment variable,
//! and the command line. Each source is tokenized and parsed on its own,
//! merged key by key, then checked against cross-flag rules.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use config::{DiskFs, EnvLookup, ProcessEnv, SourceFs};
pub use domain::{FormatterSpec, OptionValue, Origin, Resolution, ResolvedConfig, Severity};
pub use error::{ErrorKind, OptionsError};
pub use resolve::resolve;
