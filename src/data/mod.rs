//! Dataset access: local files and remote CSV fetch.

pub mod source;

pub use source::*;
