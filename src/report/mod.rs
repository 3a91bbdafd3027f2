//! Reporting utilities: formatted terminal output for dataset inspection.

pub mod format;

pub use format::*;
