//! Dataset location resolution and retrieval.
//!
//! The table can live on disk or behind an HTTP endpoint. Resolution order:
//!
//! 1. the `--data` CLI flag
//! 2. the `YC_DATA` environment variable (`.env` honored)
//! 3. the published demo dataset URL
//!
//! Anything starting with `http://`/`https://` is fetched with a blocking
//! reqwest client; everything else is treated as a local path.

use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::error::AppError;

/// Yield table from the original dash-yield-curves demo.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/quanteeai/dash-yield-curves-demo/master/data/yc.csv";

/// Where the yield table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Resolve the source from the CLI flag, the environment, or the default.
    pub fn resolve(flag: Option<&str>) -> Self {
        dotenvy::dotenv().ok();
        let raw = flag
            .map(str::to_string)
            .or_else(|| std::env::var("YC_DATA").ok())
            .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
        Self::classify(&raw)
    }

    fn classify(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::Path(PathBuf::from(raw))
        }
    }

    /// Human-readable location for reports and error messages.
    pub fn label(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
        }
    }

    /// Read the raw CSV text.
    ///
    /// A source that cannot be read is fatal: the process has no dataset to
    /// serve charts from.
    pub fn read(&self) -> Result<String, AppError> {
        match self {
            DataSource::Path(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::input(format!("Failed to open CSV '{}': {e}", path.display()))
            }),
            DataSource::Url(url) => fetch_csv(url),
        }
    }
}

fn fetch_csv(url: &str) -> Result<String, AppError> {
    let resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| AppError::runtime(format!("Dataset request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::runtime(format!(
            "Dataset request failed with status {}.",
            resp.status()
        )));
    }

    resp.text()
        .map_err(|e| AppError::runtime(format!("Failed to read dataset response: {e}")))
}
