//! Trend indicators: SMA and the MA50 / MA200 technical view

pub mod sma;
pub mod view;

pub use sma::*;
pub use view::*;
