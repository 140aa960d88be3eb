use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Call or put.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Parse an option type, case-insensitively. Exchange spellings
    /// `CE`/`PE` and the single-letter `C`/`P` are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CALL" | "C" | "CE" => Some(OptionType::Call),
            "PUT" | "P" | "PE" => Some(OptionType::Put),
            _ => None,
        }
    }

    /// Canonical upper-case spelling stored in a normalized table.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "CALL",
            OptionType::Put => "PUT",
        }
    }

    /// Title-case label used in column headers.
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which quote field feeds the matrix cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "full", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Last,
    Mid,
    Bid,
    Ask,
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PriceField::Last => "last",
            PriceField::Mid => "mid",
            PriceField::Bid => "bid",
            PriceField::Ask => "ask",
        };
        f.write_str(name)
    }
}

/// One option quote after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_ticker: Option<String>,
    /// `option_ticker` with its fixed-length prefix removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_ticker: Option<String>,
    /// Underlying symbol, upper-cased.
    pub symbol: String,
    pub expiry_date: NaiveDate,
    pub option_type: OptionType,
    pub strike: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<Decimal>,
    /// `(bid + ask) / 2` when both sides are quoted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_price: Option<Decimal>,
}

impl Contract {
    pub fn price(&self, field: PriceField) -> Option<Decimal> {
        match field {
            PriceField::Last => self.last_price,
            PriceField::Mid => self.mid_price,
            PriceField::Bid => self.bid,
            PriceField::Ask => self.ask,
        }
    }
}
