//! SMA (Simple Moving Average) indicator

use crate::models::Candle;

/// Average of the last `period` closes, or `None` if there are fewer closes
pub fn sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// SMA of candle closes for a specific period
pub fn calculate_sma(candles: &[Candle], period: usize) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    sma(&closes, period)
}
