//! Command-line entry point
//!
//! Resolves the options for this invocation and hands the result to the
//! analysis layer as JSON on stdout.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::loader::load_env_source;
use crate::config::{DiskFs, EnvLookup, ProcessEnv};
use crate::domain::{OptionValue, Origin, Resolution, SourceResult};
use crate::resolve::resolve;
use crate::schema::parse_tokens;

pub mod help;

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    init_logging(debug_requested(&args, &ProcessEnv));

    let workdir = DiskFs::current_dir().context("Failed to determine the working directory")?;
    tracing::debug!("Resolving options in {}", workdir.root().display());

    match resolve(&args, &ProcessEnv, &workdir)? {
        Resolution::Terminate { code, output } => {
            print!("{output}");
            std::io::stdout().flush().context("Failed to flush stdout")?;
            std::process::exit(code);
        }
        Resolution::Continue(config) => {
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize resolved options")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Whether `debug` ends up on, decided before logging exists: the command
/// line wins, then `RUBOCOP_OPTS`. Parse failures count as off; the full
/// resolution reports them.
fn debug_requested(args: &[String], env: &impl EnvLookup) -> bool {
    let debug_of = |source: SourceResult| source.values.get("debug").and_then(OptionValue::as_bool);

    parse_tokens(Origin::CommandLine, args)
        .ok()
        .and_then(debug_of)
        .or_else(|| load_env_source(env).ok().flatten().and_then(debug_of))
        .unwrap_or(false)
}

fn init_logging(debug: bool) {
    // RUST_LOG in the environment always takes precedence; --debug falls back to DEBUG.
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
