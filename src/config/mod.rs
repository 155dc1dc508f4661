//! Environment-based configuration
//!
//! Binaries load `.env` with `dotenvy` before calling [`Config::from_env`].

use crate::error::ConfigError;
use crate::models::{MacroReadings, SentimentFlag, YieldReading};
use crate::rules::registry::DEFAULT_RULE_TABLE;
use crate::services::fallback::RetryPolicy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Deployment environment name (`ENVIRONMENT`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|v| v.trim().to_lowercase())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub rule_table: String,
    pub sentiment: SentimentFlag,
    /// Manually entered readings served by the static providers
    pub manual_macro: MacroReadings,
    pub manual_yield: YieldReading,
    pub fallback_macro: MacroReadings,
    pub fallback_yield: YieldReading,
    pub cache_ttl: Duration,
    pub retry: RetryPolicy,
    pub rule_tables_path: Option<String>,
    /// JSON price history backing the technical view
    pub price_history_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            rule_table: DEFAULT_RULE_TABLE.to_string(),
            sentiment: SentimentFlag::Neutral,
            manual_macro: MacroReadings::default(),
            manual_yield: YieldReading::default(),
            fallback_macro: MacroReadings::default(),
            fallback_yield: YieldReading::default(),
            cache_ttl: Duration::from_secs(3600),
            retry: RetryPolicy::default(),
            rule_tables_path: None,
            price_history_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Fallbacks must be finite
        let fallback_macro = MacroReadings::new(
            parse_finite_or(&get, "FALLBACK_POLICY_RATE_A", defaults.fallback_macro.policy_rate_a)?,
            parse_finite_or(&get, "FALLBACK_POLICY_RATE_B", defaults.fallback_macro.policy_rate_b)?,
            parse_finite_or(&get, "FALLBACK_INFLATION_A", defaults.fallback_macro.inflation_a)?,
            parse_finite_or(&get, "FALLBACK_INFLATION_B", defaults.fallback_macro.inflation_b)?,
        );
        let fallback_yield = YieldReading::new(
            parse_finite_or(&get, "FALLBACK_BOND_YIELD", defaults.fallback_yield.current_yield)?,
            parse_finite_or(
                &get,
                "FALLBACK_BOND_YIELD_CHANGE",
                defaults.fallback_yield.yield_change,
            )?,
        );

        let manual_macro = MacroReadings::new(
            parse_or(&get, "POLICY_RATE_A", fallback_macro.policy_rate_a)?,
            parse_or(&get, "POLICY_RATE_B", fallback_macro.policy_rate_b)?,
            parse_or(&get, "INFLATION_A", fallback_macro.inflation_a)?,
            parse_or(&get, "INFLATION_B", fallback_macro.inflation_b)?,
        );
        let manual_yield = YieldReading::new(
            parse_or(&get, "BOND_YIELD", fallback_yield.current_yield)?,
            parse_or(&get, "BOND_YIELD_CHANGE", fallback_yield.yield_change)?,
        );

        let sentiment = match get("SENTIMENT") {
            Some(raw) => SentimentFlag::from_str(&raw).map_err(|_| ConfigError::InvalidValue {
                key: "SENTIMENT".to_string(),
                value: raw,
            })?,
            None => defaults.sentiment,
        };

        let retry = RetryPolicy::new(
            parse_or(&get, "PROVIDER_RETRY_ATTEMPTS", defaults.retry.attempts)?,
            Duration::from_millis(parse_or(
                &get,
                "PROVIDER_RETRY_MIN_DELAY_MS",
                defaults.retry.min_delay.as_millis() as u64,
            )?),
        );

        Ok(Self {
            environment: get("ENVIRONMENT")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.environment),
            port: parse_or(&get, "PORT", defaults.port)?,
            rule_table: get("BIAS_RULE_TABLE").unwrap_or(defaults.rule_table),
            sentiment,
            manual_macro,
            manual_yield,
            fallback_macro,
            fallback_yield,
            cache_ttl: Duration::from_secs(parse_or(
                &get,
                "PROVIDER_CACHE_TTL_SECONDS",
                defaults.cache_ttl.as_secs(),
            )?),
            retry,
            rule_tables_path: get("RULE_TABLES_PATH"),
            price_history_path: get("PRICE_HISTORY_PATH"),
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_finite_or<G>(get: &G, key: &str, default: f64) -> Result<f64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let value: f64 = parse_or(get, key, default)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
