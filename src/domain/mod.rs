//! Domain model: yield observations, chart-ready geometry, and styling config.

pub mod types;

pub use types::*;
