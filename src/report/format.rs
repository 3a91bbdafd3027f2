//! Formatted terminal summaries.
//!
//! We keep formatting code in one place so:
//! - the ingest/chart code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::io::ingest::{RowError, YieldTable};

/// Format the dataset summary (source + row counts + value spans).
pub fn format_dataset_summary(table: &YieldTable, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== ycd - Yield Table Summary ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        table.rows_read,
        table.rows_used,
        table.row_errors.len()
    ));
    out.push_str(&format!(
        "Dates: {} .. {} ({} distinct)\n",
        table.stats.date_min,
        table.stats.date_max,
        table.distinct_dates().len()
    ));
    out.push_str(&format!(
        "Terms: [{:.2}, {:.2}]y\n",
        table.stats.term_min, table.stats.term_max
    ));
    out.push_str(&format!(
        "Rates: [{:.2}%, {:.2}%]\n",
        table.stats.rate_min * 100.0,
        table.stats.rate_max * 100.0
    ));
    out.push_str(&format!("Countries ({}):", table.stats.n_countries));
    for country in table.distinct_countries() {
        out.push_str(&format!(" {country};"));
    }
    out.push('\n');

    out
}

/// Format the skipped-row report.
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Skipped rows ({}):\n", errors.len()));
    for e in errors {
        out.push_str(&format!("- line {}: {}\n", e.line, e.message));
    }

    out
}
