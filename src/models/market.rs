use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily OHLC bar for the pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            open,
            high,
            low,
            close,
            timestamp,
        }
    }
}

/// Oldest-first price history as returned by a market data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: String,
    pub candles: Vec<Candle>,
}

impl PriceHistory {
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

/// Central bank rates and CPI for both legs of the pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroReadings {
    pub policy_rate_a: f64,
    pub policy_rate_b: f64,
    pub inflation_a: f64,
    pub inflation_b: f64,
}

impl MacroReadings {
    pub fn new(policy_rate_a: f64, policy_rate_b: f64, inflation_a: f64, inflation_b: f64) -> Self {
        Self {
            policy_rate_a,
            policy_rate_b,
            inflation_a,
            inflation_b,
        }
    }
}

impl Default for MacroReadings {
    /// FED 5.50%, ECB 4.00%, US CPI 3.4%, EU CPI 2.9%
    fn default() -> Self {
        Self::new(5.50, 4.00, 3.4, 2.9)
    }
}

/// Reference long-term yield and its change since the prior observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldReading {
    pub current_yield: f64,
    pub yield_change: f64,
}

impl YieldReading {
    pub fn new(current_yield: f64, yield_change: f64) -> Self {
        Self {
            current_yield,
            yield_change,
        }
    }
}

impl Default for YieldReading {
    fn default() -> Self {
        Self::new(4.00, 0.0)
    }
}
