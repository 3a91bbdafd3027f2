//! Figure/bundle JSON output.
//!
//! Figures are written pretty-printed so they are easy to diff and to paste
//! into a Plotly sandbox. When no output path is given, JSON goes to stdout so
//! the CLI composes with pipes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Serialize any figure-shaped record to a pretty JSON string.
pub fn render_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::runtime(format!("Failed to serialize figure JSON: {e}")))
}

/// Write JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<(), AppError> {
    let json = render_json(value)?;
    match path {
        Some(path) => {
            let mut file = File::create(path).map_err(|e| {
                AppError::input(format!("Failed to create '{}': {e}", path.display()))
            })?;
            writeln!(file, "{json}")
                .map_err(|e| AppError::input(format!("Failed to write '{}': {e}", path.display())))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
