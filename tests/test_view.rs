
use clap::Parser;
use options_matrix::cli::{Cli, Command, MatrixArgs};
use options_matrix::config::ViewConfig;
use options_matrix::model::{DisplayMode, PriceField};
use options_matrix::{DateRange, Matrix, MatrixError, NormalizedTable, SchemaVariant, view};
use rust_decimal_macros::dec;

use sheet_common::*;

fn matrix_args(extra: &[&str]) -> MatrixArgs {
    let argv = ["options-matrix", "matrix", "quotes.csv", "--today", "2024-02-01"]
        .into_iter()
        .chain(extra.iter().copied());
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Matrix(args) => args,
        _ => panic!("expected the matrix command"),
    }
}

fn sheet() -> NormalizedTable {
    normalized(&sample_broker_sheet(), SchemaVariant::BrokerExtract)
}

fn build(extra: &[&str]) -> anyhow::Result<Matrix> {
    let args = matrix_args(extra);
    let config = ViewConfig::from_cli(&args)?;
    view::build_matrix(&sheet(), &args, &config)
}

// ── Symbol selection ─────────────────────────────────────────────────

#[test]
fn test_default_symbol_is_first_alphabetically() {
    let matrix = build(&[]).unwrap();
    assert_eq!(matrix.symbol, "BANKNIFTY");
    assert_eq!(matrix.strikes(), vec![dec!(48000)]);
}

#[test]
fn test_unknown_symbol_is_an_empty_matrix_not_an_error() {
    let matrix = build(&["--symbol", "sensex"]).unwrap();
    assert_eq!(matrix.symbol, "SENSEX");
    assert!(matrix.is_empty());
}

// ── Expiry window ────────────────────────────────────────────────────

#[test]
fn test_default_window_spans_whole_dataset_expiries() {
    let matrix = build(&["--symbol", "NIFTY"]).unwrap();
    assert_eq!(
        matrix.range,
        Some(DateRange::new(ymd(2024, 6, 26), ymd(2024, 9, 26)).unwrap())
    );
    assert_eq!(matrix.expiries.len(), 3);
}

#[test]
fn test_all_dates_drops_the_window() {
    let matrix = build(&["--symbol", "NIFTY", "--all-dates"]).unwrap();
    assert_eq!(matrix.range, None);
    assert_eq!(
        matrix.expiries,
        vec![ymd(2024, 6, 27), ymd(2024, 7, 25), ymd(2024, 9, 26)]
    );
}

#[test]
fn test_from_narrows_the_window() {
    let matrix = build(&["--symbol", "NIFTY", "--from", "2024-07-01"]).unwrap();
    assert_eq!(matrix.expiries, vec![ymd(2024, 7, 25), ymd(2024, 9, 26)]);
}

#[test]
fn test_from_after_last_expiry_is_invalid_range() {
    let err = build(&["--symbol", "NIFTY", "--from", "2024-12-01"]).unwrap_err();
    assert!(
        matches!(err.downcast_ref::<MatrixError>(), Some(MatrixError::InvalidRange { .. })),
        "got: {err}"
    );
}

#[test]
fn test_all_dates_conflicts_with_bounds() {
    let argv = ["options-matrix", "matrix", "q.csv", "--all-dates", "--from", "2024-01-01"];
    assert!(Cli::try_parse_from(argv).is_err());
}

// ── Display settings ─────────────────────────────────────────────────

#[test]
fn test_combined_flag_and_price_default() {
    let args = matrix_args(&["--combined"]);
    let config = ViewConfig::from_cli(&args).unwrap();
    assert_eq!(config.mode, DisplayMode::Combined);
    assert_eq!(config.price, None);
    assert_eq!(config.today, ymd(2024, 2, 1));

    let args = matrix_args(&["--price", "bid"]);
    assert_eq!(ViewConfig::from_cli(&args).unwrap().price, Some(PriceField::Bid));
}

#[test]
fn test_zero_width_is_rejected() {
    let args = matrix_args(&["--ticker-width", "0"]);
    let err = ViewConfig::from_cli(&args).unwrap_err();
    assert!(err.to_string().contains("ticker-width"), "got: {err}");
}
