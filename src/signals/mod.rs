//! Bias scoring and rationale rendering.

pub mod engine;
pub mod rationale;

pub use engine::{BiasEngine, DerivedMetrics};
pub use rationale::{render, RenderValue};
