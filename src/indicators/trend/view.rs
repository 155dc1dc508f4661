//! Technical context shown next to the fundamental bias

use crate::indicators::trend::sma::sma;
use crate::models::PriceHistory;
use serde::{Deserialize, Serialize};

pub const FAST_MA_PERIOD: usize = 50;
pub const SLOW_MA_PERIOD: usize = 200;

/// Position of the last close relative to the slow moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendPosition {
    AboveSlowAverage,
    BelowSlowAverage,
    Undetermined,
}

impl TrendPosition {
    pub fn description(&self) -> &'static str {
        match self {
            TrendPosition::AboveSlowAverage => "Above the MA200 (bullish trend)",
            TrendPosition::BelowSlowAverage => "Below the MA200 (bearish trend)",
            TrendPosition::Undetermined => "Not enough history for the MA200",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalView {
    pub symbol: String,
    pub current_price: f64,
    pub previous_price: f64,
    pub change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_fast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_slow: Option<f64>,
    pub trend: TrendPosition,
}

impl TechnicalView {
    /// Needs at least two closes; moving averages are omitted while their window is short.
    pub fn from_history(history: &PriceHistory) -> Option<Self> {
        let closes = history.closes();
        if closes.len() < 2 {
            return None;
        }

        let current_price = closes[closes.len() - 1];
        let previous_price = closes[closes.len() - 2];
        let ma_fast = sma(&closes, FAST_MA_PERIOD);
        let ma_slow = sma(&closes, SLOW_MA_PERIOD);

        let trend = match ma_slow {
            Some(ma) if current_price > ma => TrendPosition::AboveSlowAverage,
            Some(_) => TrendPosition::BelowSlowAverage,
            None => TrendPosition::Undetermined,
        };

        Some(Self {
            symbol: history.symbol.clone(),
            current_price,
            previous_price,
            change: round_to(current_price - previous_price, 4),
            ma_fast,
            ma_slow,
            trend,
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
