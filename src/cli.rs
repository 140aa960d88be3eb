use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::PriceField;
use crate::normalize::parse;
use crate::render::OutputFormat;
use crate::variant::SchemaVariant;

/// Options matrix viewer: validate an options quote sheet and pivot it
/// into a strike x expiry matrix.
#[derive(Parser)]
#[command(name = "options-matrix", version, about)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a quote sheet against a supported layout
    Validate {
        /// Path to the CSV/TSV export of the sheet
        file: PathBuf,

        /// Layout to validate against
        #[arg(long, value_enum, default_value = "auto")]
        schema: Layout,
    },

    /// List the underlying symbols in a quote sheet
    Symbols {
        /// Path to the CSV/TSV export of the sheet
        file: PathBuf,

        /// Layout of the sheet
        #[arg(long, value_enum, default_value = "auto")]
        schema: Layout,
    },

    /// Pivot one symbol's quotes into a strike x expiry matrix
    Matrix(MatrixArgs),

    /// Output the JSON schema of `matrix --format json` output
    Schema,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Path to the CSV/TSV export of the sheet
    pub file: PathBuf,

    /// Layout of the sheet
    #[arg(long, value_enum, default_value = "auto")]
    pub schema: Layout,

    /// Underlying symbol (default: first symbol alphabetically)
    #[arg(long, short = 's')]
    pub symbol: Option<String>,

    /// First expiry to include (default: first expiry on or after today)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Last expiry to include (default: twelve months after --from)
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Show every expiry, ignoring --from/--to and the default window
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all_dates: bool,

    /// One "Call | Put" column per expiry instead of two
    #[arg(long)]
    pub combined: bool,

    /// Quote field shown in cells (default: last for broker extracts, mid
    /// for generic sheets)
    #[arg(long, value_enum)]
    pub price: Option<PriceField>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Date treated as today when picking the default window
    #[arg(long, env = "OPTIONS_MATRIX_TODAY", value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Minimum width of the ticker part of a cell
    #[arg(long, env = "OPTIONS_MATRIX_TICKER_WIDTH", default_value = "6")]
    pub ticker_width: usize,

    /// Minimum width of the price part of a cell
    #[arg(long, env = "OPTIONS_MATRIX_PRICE_WIDTH", default_value = "6")]
    pub price_width: usize,
}

/// `--schema` choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Detect from the header row
    Auto,
    /// TckrSymb/Asst/XprtnDt/OptnTp/ExrcPric/OptnStyle/Last
    Broker,
    /// symbol/expiry_date/strike/option_type/bid/ask/volume/open_interest
    Generic,
}

impl Layout {
    pub fn variant(self) -> Option<SchemaVariant> {
        match self {
            Layout::Auto => None,
            Layout::Broker => Some(SchemaVariant::BrokerExtract),
            Layout::Generic => Some(SchemaVariant::Generic),
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse::parse_date(s).ok_or_else(|| format!("'{s}' is not a date (try YYYY-MM-DD)"))
}
