//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the yield table (local file or remote CSV)
//! - builds figures via the chart components
//! - prints reports
//! - writes figure/payload JSON

use clap::Parser;

use crate::chart::{CurveReshaper, SnapshotFilter};
use crate::cli::{BundleArgs, Command, DataArgs, MapArgs, SurfaceArgs};
use crate::data::DataSource;
use crate::domain::{ChartStyle, MapScope};
use crate::error::AppError;
use crate::io::ingest::{YieldTable, read_table};

pub mod pipeline;

/// Entry point for the `ycd` binary.
pub fn run() -> Result<(), AppError> {
    // We want `ycd` and `ycd -c France` to behave like `ycd bundle ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // keeping the zero-argument UX of the original dashboard startup.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Surface(args) => handle_surface(args),
        Command::Map(args) => handle_map(args),
        Command::Bundle(args) => handle_bundle(args),
        Command::Dates(args) => handle_dates(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_surface(args: SurfaceArgs) -> Result<(), AppError> {
    let table = load_table(&args.data)?;
    let reshaper = CurveReshaper::new(ChartStyle::default());
    let figure = reshaper.build(&table.observations, &args.country);
    crate::io::export::write_json(args.out.as_deref(), &figure)
}

fn handle_map(args: MapArgs) -> Result<(), AppError> {
    let table = load_table(&args.data)?;
    let filter = SnapshotFilter::new(style_with_scope(args.scope));
    let figure = filter.build(&table.observations, args.date, args.term);
    crate::io::export::write_json(args.out.as_deref(), &figure)
}

fn handle_bundle(args: BundleArgs) -> Result<(), AppError> {
    let table = load_table(&args.data)?;
    let request = pipeline::BundleRequest {
        country: args.country,
        date: args.date,
        term: args.term,
        style: style_with_scope(args.scope),
    };
    let bundle = pipeline::build_bundle(&table, &request)?;
    crate::io::export::write_json(args.out.as_deref(), &bundle)
}

fn handle_dates(args: DataArgs) -> Result<(), AppError> {
    let table = load_table(&args)?;
    for option in pipeline::dropdown_options(&table) {
        println!("{}", option.value);
    }
    Ok(())
}

fn handle_summary(args: DataArgs) -> Result<(), AppError> {
    let source = DataSource::resolve(args.data.as_deref());
    let table = read_table(source.read()?.as_bytes())?;

    println!(
        "{}",
        crate::report::format_dataset_summary(&table, &source.label())
    );
    if !table.row_errors.is_empty() {
        println!("{}", crate::report::format_row_errors(&table.row_errors));
    }
    Ok(())
}

fn load_table(args: &DataArgs) -> Result<YieldTable, AppError> {
    let source = DataSource::resolve(args.data.as_deref());
    read_table(source.read()?.as_bytes())
}

fn style_with_scope(scope: MapScope) -> ChartStyle {
    ChartStyle {
        map_scope: scope,
        ..ChartStyle::default()
    }
}

/// Rewrite argv so `ycd` defaults to `ycd bundle`.
///
/// Rules:
/// - `ycd`                     -> `ycd bundle`
/// - `ycd -c France ...`       -> `ycd bundle -c France ...`
/// - `ycd --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("bundle".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "surface" | "map" | "bundle" | "dates" | "summary"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "bundle flags".
    if arg1.starts_with('-') {
        argv.insert(1, "bundle".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
