//! Error types shared across the engine, registry and provider layers.

use thiserror::Error;

/// Errors raised by snapshot construction, the engine boundary and the registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BiasError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("rule table not found: {0}")]
    NotFound(String),

    #[error("rule table already registered: {0}")]
    DuplicateName(String),

    #[error("invalid rule table: {reason}")]
    InvalidRuleTable { reason: String },
}

impl BiasError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_table(reason: impl Into<String>) -> Self {
        Self::InvalidRuleTable {
            reason: reason.into(),
        }
    }
}

/// Errors reported by data provider collaborators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("provider {provider} unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("provider returned invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("failed to load rule tables from {path}: {reason}")]
    RuleTables { path: String, reason: String },

    #[error(transparent)]
    Bias(#[from] BiasError),
}
