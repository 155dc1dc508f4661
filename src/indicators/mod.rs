//! Technical indicators computed from an already-fetched price history.

pub mod trend;

pub use trend::{TechnicalView, TrendPosition};
