//! Core application primitives (evaluation context, HTTP server)

pub mod context;
pub mod http;

pub use context::BiasContext;
pub use http::*;
