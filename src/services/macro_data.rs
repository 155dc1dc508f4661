//! Macro (rates, CPI) and sentiment (long yield) readings.

use crate::error::ProviderError;
use crate::models::{MacroReadings, YieldReading};
use crate::services::provider::{ensure_finite, DataProvider, Reading};

/// Yields `(policy_rate_a, policy_rate_b, inflation_a, inflation_b)`
pub type MacroDataProvider = dyn DataProvider<MacroReadings>;

/// Yields `(current_yield, yield_change)`
pub type SentimentDataProvider = dyn DataProvider<YieldReading>;

impl Reading for MacroReadings {
    fn validate(&self) -> Result<(), ProviderError> {
        ensure_finite("policy_rate_a", self.policy_rate_a)?;
        ensure_finite("policy_rate_b", self.policy_rate_b)?;
        ensure_finite("inflation_a", self.inflation_a)?;
        ensure_finite("inflation_b", self.inflation_b)
    }
}

impl Reading for YieldReading {
    fn validate(&self) -> Result<(), ProviderError> {
        ensure_finite("current_yield", self.current_yield)?;
        ensure_finite("yield_change", self.yield_change)
    }
}
