//! Rule set loading.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::models::Rule;
use crate::validation::schema::validate_rule_set;

use super::reader::read_json;

/// Reads the rule set fresh on every call.
#[derive(Debug, Clone)]
pub struct RuleLoader {
    path: PathBuf,
}

impl RuleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all valid rules in input order.
    ///
    /// An absent resource is an empty rule set. Invalid records are dropped;
    /// only an unparseable document or a bad `rules` wrapper is an error.
    pub fn load_rules(&self, ctx: &LogContext) -> Result<Vec<Rule>> {
        let Some(doc) = read_json(&self.path)? else {
            log::warn!("{} RULES_ABSENT path={}", ctx, self.path.display());
            return Ok(Vec::new());
        };

        let validated = validate_rule_set(&doc, &self.path, ctx)?;

        log::info!(
            "{} RULES_LOADED count={} dropped={}",
            ctx,
            validated.rules.len(),
            validated.rejected.len()
        );

        Ok(validated.rules)
    }
}
