//! Command-line parsing for the yield-curve dashboard figure builder.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the ingest/chart code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::MapScope;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ycd", version, about = "Yield-curve dashboard figure builder (Plotly schema)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Emit the 3-D surface figure of one country's curve history.
    Surface(SurfaceArgs),
    /// Emit the choropleth figure for one (date, term) cross-section.
    ///
    /// This is the dropdown callback of the dashboard: the front end invokes it
    /// with the selected dropdown value as `--date`.
    Map(MapArgs),
    /// Emit the full dashboard payload: dropdown options, initial selection,
    /// surface figure, and the map figure for the initial selection.
    Bundle(BundleArgs),
    /// Print the dropdown option values (distinct dates, newest first).
    Dates(DataArgs),
    /// Print dataset statistics and any skipped-row report.
    Summary(DataArgs),
}

/// Where to load the yield table from.
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// Dataset CSV: local path or http(s) URL.
    ///
    /// Defaults to the `YC_DATA` environment variable (`.env` honored), then
    /// the published demo dataset.
    #[arg(long, value_name = "PATH_OR_URL")]
    pub data: Option<String>,
}

/// Options for the surface figure.
#[derive(Debug, Parser, Clone)]
pub struct SurfaceArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Country whose curve history to plot.
    #[arg(short = 'c', long, default_value = "United Kingdom")]
    pub country: String,

    /// Write the figure JSON here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Options for the choropleth figure.
#[derive(Debug, Parser, Clone)]
pub struct MapArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Cross-section date (YYYY-MM-DD), matched exactly against the table.
    #[arg(short = 'd', long)]
    pub date: NaiveDate,

    /// Cross-section term in years, matched exactly against the table.
    #[arg(short = 't', long, default_value_t = 1.0)]
    pub term: f64,

    /// Geographic scope of the base map.
    #[arg(long, value_enum, default_value_t = MapScope::Europe)]
    pub scope: MapScope,

    /// Write the figure JSON here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Options for the full dashboard payload.
#[derive(Debug, Parser, Clone)]
pub struct BundleArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Country for the surface figure.
    #[arg(short = 'c', long, default_value = "United Kingdom")]
    pub country: String,

    /// Initially selected dropdown date (defaults to the newest in the table).
    #[arg(short = 'd', long)]
    pub date: Option<NaiveDate>,

    /// Term for the map cross-section.
    #[arg(short = 't', long, default_value_t = 1.0)]
    pub term: f64,

    /// Geographic scope of the base map.
    #[arg(long, value_enum, default_value_t = MapScope::Europe)]
    pub scope: MapScope,

    /// Write the payload JSON here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}
