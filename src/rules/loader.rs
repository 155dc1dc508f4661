//! Loading extra rule tables from a JSON file

use crate::error::ConfigError;
use crate::models::RuleTable;
use crate::rules::registry::RuleTableRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A rule table together with the name it is registered under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRuleTable {
    pub name: String,
    #[serde(flatten)]
    pub table: RuleTable,
}

/// Parse a JSON array of named rule tables
pub fn parse_rule_tables(json: &str) -> Result<Vec<NamedRuleTable>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read `path` and register every table it contains. Returns how many were added.
/// A file with any bad or taken name registers nothing.
pub fn load_rule_tables(
    registry: &RuleTableRegistry,
    path: impl AsRef<Path>,
) -> Result<usize, ConfigError> {
    let path = path.as_ref();
    let rule_tables_error = |reason: String| ConfigError::RuleTables {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| rule_tables_error(e.to_string()))?;
    let tables = parse_rule_tables(&contents).map_err(|e| rule_tables_error(e.to_string()))?;

    let count = registry.register_all(
        tables
            .into_iter()
            .map(|named| (named.name, named.table))
            .collect(),
    )?;

    info!(path = %path.display(), count, "Loaded rule tables from file");
    Ok(count)
}
