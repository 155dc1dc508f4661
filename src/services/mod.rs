//! Provider collaborators feeding the bias engine.

pub mod assembler;
pub mod cache;
pub mod fallback;
pub mod macro_data;
pub mod market_data;
pub mod provider;

pub use assembler::{AssembledSnapshot, SnapshotAssembler};
pub use cache::CachedProvider;
pub use fallback::{FallbackProvider, RetryPolicy, Sourced};
pub use macro_data::{MacroDataProvider, SentimentDataProvider};
pub use market_data::MarketDataProvider;
pub use provider::{
    DataProvider, JsonFileProvider, Reading, StaticProvider, UnavailableProvider,
};
