//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - figure/bundle JSON output (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
