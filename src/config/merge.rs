//! Precedence merge of the parsed option sources
//!
//! Lowest to highest: `.rubocop` file, `RUBOCOP_OPTS`, command line. A key
//! takes its whole value from the highest source that set it; lists are
//! replaced, never unioned.

use std::collections::BTreeMap;

use crate::domain::{ResolvedConfig, SourceResult};

pub fn merge(
    cli: SourceResult,
    file: Option<SourceResult>,
    env: Option<SourceResult>,
) -> ResolvedConfig {
    let mut values = BTreeMap::new();
    let mut origins = BTreeMap::new();

    let positionals = cli.positionals.clone();
    let mut sources: Vec<SourceResult> = [file, env, Some(cli)].into_iter().flatten().collect();
    sources.sort_by_key(|source| source.origin);

    for source in sources {
        for (key, value) in source.values {
            if let Some(previous) = origins.insert(key, source.origin) {
                tracing::debug!(key, from = %previous, to = %source.origin, "option overridden");
            }
            values.insert(key, value);
        }
    }

    ResolvedConfig::new(values, positionals, origins)
}
