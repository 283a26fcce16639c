//! Top-level resolution pipeline
//!
//! command line -> (help?) -> `.rubocop` + `RUBOCOP_OPTS` -> merge ->
//! validate -> (version?) -> configuration.

use crate::cli::help::{help_text, verbose_version_text, version_text};
use crate::config::{load_sources, merge, EnvLookup, SourceFs};
use crate::domain::{Origin, Resolution};
use crate::error::Result;
use crate::schema::parse_tokens;
use crate::validate::validate;

/// Resolve `args` (without the program name) against the environment and
/// the options file reachable through `fs`.
///
/// Help short-circuits before any other source is read. Version output
/// happens only after validation, so conflicting action flags still fail.
pub fn resolve(args: &[String], env: &impl EnvLookup, fs: &impl SourceFs) -> Result<Resolution> {
    let cli = parse_tokens(Origin::CommandLine, args)?;
    if cli.help_requested {
        return Ok(Resolution::Terminate { code: 0, output: help_text() });
    }

    let loaded = load_sources(env, fs)?;
    if loaded.file.iter().chain(loaded.env.iter()).any(|source| source.help_requested) {
        return Ok(Resolution::Terminate { code: 0, output: help_text() });
    }

    let config = merge(cli, loaded.file, loaded.env);
    validate(&config)?;

    if config.flag("verbose_version") {
        return Ok(Resolution::Terminate { code: 0, output: verbose_version_text() });
    }
    if config.flag("version") {
        return Ok(Resolution::Terminate { code: 0, output: version_text() });
    }

    tracing::debug!(
        keys = config.values().len(),
        positionals = config.positionals().len(),
        "options resolved"
    );
    Ok(Resolution::Continue(config))
}
