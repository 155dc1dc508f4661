//! Shared data models spanning the engine layers.

pub mod bias;
pub mod market;
pub mod rule_table;
pub mod snapshot;

pub use bias::{BiasLabel, BiasReport, BiasResult, DataOrigin, InputOrigins, TradingFocus};
pub use market::{Candle, MacroReadings, PriceHistory, YieldReading};
pub use rule_table::{
    Banding, Comparison, Metric, RuleTable, RuleTableConfig, ThresholdRule, EQUALITY_EPSILON,
};
pub use snapshot::{IndicatorSnapshot, SentimentFlag, SnapshotInput};
