//! Macro-fundamental bias engine for a currency pair.
//!
//! Indicator snapshots are scored against named rule tables to produce a
//! directional bias (score, label and rationale trail).

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod presentation;
pub mod rules;
pub mod services;
pub mod signals;

pub use error::{BiasError, ConfigError, ProviderError};
pub use models::{BiasLabel, BiasResult, IndicatorSnapshot, RuleTable, SentimentFlag};
pub use rules::registry::{RuleTableRegistry, DEFAULT_RULE_TABLE};
pub use signals::engine::BiasEngine;

/// Evaluate a snapshot against a rule table held by the process-wide registry.
pub fn evaluate(
    snapshot: &IndicatorSnapshot,
    rule_table_name: &str,
) -> Result<BiasResult, BiasError> {
    RuleTableRegistry::global().evaluate(snapshot, rule_table_name)
}

/// Evaluate a snapshot against the `"default"` rule table.
pub fn evaluate_default(snapshot: &IndicatorSnapshot) -> Result<BiasResult, BiasError> {
    evaluate(snapshot, DEFAULT_RULE_TABLE)
}
