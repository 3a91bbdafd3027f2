//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built from a CSV ingest pass
//! - reshaped into chart geometry without copies of the whole table
//! - compared structurally in tests (everything derives `PartialEq`)

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One row of the source table: the spot rate for a `(date, term, country)` cell.
///
/// `term` is the tenor in years and `spot_rate` is a decimal yield
/// (`0.0071` means 0.71%). Observations are never mutated after ingest; every
/// chart is re-derived from the full table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldObservation {
    pub date: NaiveDate,
    pub term: f64,
    pub country: String,
    pub spot_rate: f64,
}

/// Axis arrays for a 3-D surface chart of one country's curve history.
///
/// `rates` is indexed `[date][term]`, so its dimensions are always
/// `(date_labels.len(), terms.len())`. A `(date, term)` combination absent from
/// the source table becomes a NaN cell, which serializes as JSON `null` and
/// renders as a hole in the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceGeometry {
    pub country: String,
    /// Distinct terms (years), first-seen order. Surface x-axis.
    pub terms: Vec<f64>,
    /// Distinct dates formatted as short labels (e.g. "Feb 2019"). Surface y-axis.
    pub date_labels: Vec<String>,
    /// Spot rates, one row per date label. Surface z-axis.
    pub rates: Vec<Vec<f64>>,
}

impl SurfaceGeometry {
    pub fn is_empty(&self) -> bool {
        self.date_labels.is_empty()
    }
}

/// Per-country spot rates for one `(date, term)` cross-section.
///
/// Invariant: at most one entry per country. Duplicate countries in the source
/// rows resolve last-seen-wins, keeping the first-seen position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub date: NaiveDate,
    pub term: f64,
    pub entries: Vec<MapEntry>,
}

impl MapSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One shaded region of the choropleth: a country, its rate, and the hover text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub country: String,
    pub spot_rate: f64,
    /// Hover label, e.g. `"0.71%<br>UK"`.
    pub label: String,
}

impl MapEntry {
    pub fn new(country: impl Into<String>, spot_rate: f64) -> Self {
        let country = country.into();
        let label = format!("{:.2}%<br>{}", spot_rate * 100.0, country);
        Self {
            country,
            spot_rate,
            label,
        }
    }
}

/// Brand color palette.
///
/// The surface colorscale interpolates `blue -> intense_blue`; the remaining
/// colors are kept for front ends styling the page around the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub blue: String,
    pub light_blue: String,
    pub dark_blue: String,
    pub intense_blue: String,
    pub yellow: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            blue: "#0b578e".to_string(),
            light_blue: "#e6f2ff".to_string(),
            dark_blue: "#264e86".to_string(),
            intense_blue: "#119dff".to_string(),
            yellow: "#f4b400".to_string(),
        }
    }
}

/// Geographic scope of the choropleth base map.
///
/// Names follow Plotly's `layout.geo.scope` values (note the spaces in the
/// Americas scopes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapScope {
    World,
    Europe,
    Usa,
    Asia,
    Africa,
    #[serde(rename = "north america")]
    #[value(name = "north-america")]
    NorthAmerica,
    #[serde(rename = "south america")]
    #[value(name = "south-america")]
    SouthAmerica,
}

/// Chart styling passed into the figure builders at construction.
///
/// The original demo kept these as module-level globals; making them explicit
/// lets callers restyle without touching the transformation code.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub palette: Palette,
    pub map_scope: MapScope,
    /// Named Plotly colorscale for the choropleth.
    pub map_colorscale: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            map_scope: MapScope::Europe,
            map_colorscale: "Viridis".to_string(),
        }
    }
}
