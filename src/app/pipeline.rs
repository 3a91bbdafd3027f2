//! Shared "dashboard payload" logic used by the CLI front end.
//!
//! Keeping this in one place avoids duplicating the core wiring:
//! table -> dropdown options -> startup surface -> initial map selection
//!
//! A web front end embedding the library can call `build_bundle` once at
//! startup and re-run only the map figure on each dropdown change.

use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::{CurveReshaper, Figure, SnapshotFilter};
use crate::domain::ChartStyle;
use crate::error::AppError;
use crate::io::ingest::YieldTable;

/// One dropdown entry in the shape Dash expects (`{label, value}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// What the dashboard needs to render its initial state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardBundle {
    /// Distinct observation dates, newest first.
    pub options: Vec<DropdownOption>,
    /// The initially selected dropdown date.
    pub initial_date: NaiveDate,
    /// Startup surface figure (computed once, never re-rendered).
    pub surface: Figure,
    /// Map figure for the initial selection.
    pub map: Figure,
}

/// Parameters for one bundle build.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    pub country: String,
    /// Selected date; `None` means the newest date in the table.
    pub date: Option<NaiveDate>,
    pub term: f64,
    pub style: ChartStyle,
}

/// Dropdown options: distinct dates, newest first, ISO-formatted.
pub fn dropdown_options(table: &YieldTable) -> Vec<DropdownOption> {
    let mut dates = table.distinct_dates();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
        .into_iter()
        .map(|d| DropdownOption {
            label: d.to_string(),
            value: d.to_string(),
        })
        .collect()
}

/// Build the full dashboard payload.
pub fn build_bundle(table: &YieldTable, request: &BundleRequest) -> Result<DashboardBundle, AppError> {
    let options = dropdown_options(table);
    let initial_date = match request.date {
        Some(date) => date,
        None => table
            .distinct_dates()
            .into_iter()
            .max()
            .ok_or_else(|| AppError::no_data("Yield table has no observation dates."))?,
    };

    let surface = CurveReshaper::new(request.style.clone())
        .build(&table.observations, &request.country);
    let map = SnapshotFilter::new(request.style.clone())
        .build(&table.observations, initial_date, request.term);

    Ok(DashboardBundle {
        options,
        initial_date,
        surface,
        map,
    })
}
