
use options_matrix::format::CellFormat;
use options_matrix::pivot::{self, PivotRequest};
use options_matrix::render::{self, OutputFormat};
use options_matrix::{DisplayMode, Matrix, SchemaVariant};

use sheet_common::*;

fn rendered(matrix: &Matrix, format: OutputFormat) -> String {
    let mut out = Vec::new();
    render::write(matrix, format, &CellFormat::default(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn banknifty() -> Matrix {
    let table = normalized(&sample_broker_sheet(), SchemaVariant::BrokerExtract);
    pivot::pivot(&table, &PivotRequest::new("BANKNIFTY"))
}

#[test]
fn test_text_output_aligns_columns() {
    let text = rendered(&banknifty(), OutputFormat::Text);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "BANKNIFTY");
    assert_eq!(lines[1], "  Strike  2024-06-26 Call  2024-06-26 Put");
    assert!(lines[2].chars().all(|c| c == '-'));
    assert_eq!(lines[3], "48000.00  5000CE 320.00");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_text_output_for_empty_selection() {
    let table = normalized(&sample_broker_sheet(), SchemaVariant::BrokerExtract);
    let matrix = pivot::pivot(&table, &PivotRequest::new("SENSEX"));
    let text = rendered(&matrix, OutputFormat::Text);
    assert_eq!(text, "SENSEX\n(no contracts in selection)\n");
}

#[test]
fn test_csv_output_keeps_strike_verbatim() {
    let csv = rendered(&banknifty(), OutputFormat::Csv);
    assert_eq!(
        csv,
        "Strike,2024-06-26 Call,2024-06-26 Put\n48000,5000CE 320.00,\n"
    );
}

#[test]
fn test_json_output_keeps_ticker_and_price_apart() {
    let table = normalized(&sample_broker_sheet(), SchemaVariant::BrokerExtract);
    let request = PivotRequest::new("NIFTY").with_mode(DisplayMode::Combined);
    let matrix = pivot::pivot(&table, &request);

    let json = rendered(&matrix, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["symbol"], "NIFTY");
    assert_eq!(value["mode"], "combined");
    let cell = &value["rows"][1]["cells"][0];
    assert_eq!(cell["call"]["short_ticker"], "1000CE");
    assert_eq!(cell["put"]["short_ticker"], "1000PE");

    let back: Matrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, matrix);
}
