//! Cross-flag validation of a merged configuration

use crate::domain::ResolvedConfig;
use crate::error::Result;

pub mod rules;

pub use rules::{ConstraintRule, RULES};

/// Run every rule in declared order; the first one that fires aborts.
pub fn validate(config: &ResolvedConfig) -> Result<()> {
    for rule in RULES {
        if let Some(err) = (rule.check)(config) {
            tracing::debug!(rule = rule.name, "constraint rule fired: {}", err);
            return Err(err);
        }
    }
    Ok(())
}
