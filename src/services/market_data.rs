//! Market data provider interface. Price fetching itself lives outside this crate.

use crate::error::ProviderError;
use crate::models::PriceHistory;
use crate::services::provider::{ensure_finite, DataProvider, Reading};

pub type MarketDataProvider = dyn DataProvider<PriceHistory>;

impl Reading for PriceHistory {
    fn validate(&self) -> Result<(), ProviderError> {
        if self.candles.is_empty() {
            return Err(ProviderError::Unavailable {
                provider: self.symbol.clone(),
                reason: "empty price history".to_string(),
            });
        }
        for candle in &self.candles {
            ensure_finite("close", candle.close)?;
        }
        Ok(())
    }
}
