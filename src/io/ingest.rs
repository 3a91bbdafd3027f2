//! CSV ingest and validation.
//!
//! This module turns the raw yield table into a clean set of
//! `YieldObservation`s that are safe to reshape into charts.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (row order is preserved, values untouched)
//! - **Separation of concerns**: no chart logic here

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::YieldObservation;
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 4] = ["date", "term", "country", "spot_rate"];

/// Summary stats about the observations actually loaded.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_observations: usize,
    pub n_countries: usize,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub term_min: f64,
    pub term_max: f64,
    pub rate_min: f64,
    pub rate_max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: observations in source order + stats + row errors.
#[derive(Debug, Clone)]
pub struct YieldTable {
    pub observations: Vec<YieldObservation>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl YieldTable {
    /// Build a table from in-memory observations (tests, embedding callers).
    pub fn from_observations(observations: Vec<YieldObservation>) -> Result<Self, AppError> {
        let stats = compute_stats(&observations)
            .ok_or_else(|| AppError::no_data("No observations supplied."))?;
        let rows_used = observations.len();
        Ok(Self {
            observations,
            stats,
            row_errors: Vec::new(),
            rows_read: rows_used,
            rows_used,
        })
    }

    /// Distinct observation dates, first-seen order.
    pub fn distinct_dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        for o in &self.observations {
            if !dates.contains(&o.date) {
                dates.push(o.date);
            }
        }
        dates
    }

    /// Distinct countries, first-seen order.
    pub fn distinct_countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = Vec::new();
        for o in &self.observations {
            if !countries.iter().any(|c| c == &o.country) {
                countries.push(o.country.clone());
            }
        }
        countries
    }
}

/// Parse and validate the yield table from any reader.
pub fn read_table<R: Read>(reader: R) -> Result<YieldTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(obs) => observations.push(obs),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = observations.len();
    let stats = compute_stats(&observations).ok_or_else(|| {
        AppError::no_data("No valid rows remain after parsing the yield table.")
    })?;

    Ok(YieldTable {
        observations,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿date"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(AppError::input(format!(
                "Missing required column: `{column}`"
            )));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<YieldObservation, String> {
    let date = parse_date(get_required(record, header_map, "date")?)?;
    let term = parse_f64(get_required(record, header_map, "term")?, "term")?;
    let country = get_required(record, header_map, "country")?.to_string();
    let spot_rate = parse_f64(get_required(record, header_map, "spot_rate")?, "spot_rate")?;

    Ok(YieldObservation {
        date,
        term,
        country,
        spot_rate,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the norm (`YYYY-MM-DD`), but spreadsheet exports often use
    // `DD/MM/YYYY` or `DD-MM-YYYY`. We accept a small set of common formats to
    // reduce friction while keeping parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `{name}` value '{s}'."));
    }
    Ok(v)
}

fn compute_stats(observations: &[YieldObservation]) -> Option<DatasetStats> {
    let first = observations.first()?;

    let mut date_min = first.date;
    let mut date_max = first.date;
    let mut term_min = f64::INFINITY;
    let mut term_max = f64::NEG_INFINITY;
    let mut rate_min = f64::INFINITY;
    let mut rate_max = f64::NEG_INFINITY;

    for o in observations {
        date_min = date_min.min(o.date);
        date_max = date_max.max(o.date);
        term_min = term_min.min(o.term);
        term_max = term_max.max(o.term);
        rate_min = rate_min.min(o.spot_rate);
        rate_max = rate_max.max(o.spot_rate);
    }

    let mut countries: Vec<&str> = observations.iter().map(|o| o.country.as_str()).collect();
    countries.sort_unstable();
    countries.dedup();

    Some(DatasetStats {
        n_observations: observations.len(),
        n_countries: countries.len(),
        date_min,
        date_max,
        term_min,
        term_max,
        rate_min,
        rate_max,
    })
}
