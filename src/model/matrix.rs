use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::contract::OptionType;
use super::range::DateRange;
use crate::format::Quote;

/// How calls and puts share the columns of one expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Two columns per expiry: calls, then puts.
    #[default]
    Split,
    /// One "Call | Put" column per expiry.
    Combined,
}

/// Which side(s) of the book a matrix column carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSide {
    Call,
    Put,
    Both,
}

impl ColumnSide {
    pub fn includes(&self, option_type: OptionType) -> bool {
        match self {
            ColumnSide::Both => true,
            ColumnSide::Call => option_type == OptionType::Call,
            ColumnSide::Put => option_type == OptionType::Put,
        }
    }
}

impl From<OptionType> for ColumnSide {
    fn from(option_type: OptionType) -> Self {
        match option_type {
            OptionType::Call => ColumnSide::Call,
            OptionType::Put => ColumnSide::Put,
        }
    }
}

/// A non-Strike column of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatrixColumn {
    pub expiry: NaiveDate,
    pub side: ColumnSide,
    /// Human-readable header, e.g. `2024-06-21 Call`.
    pub label: String,
}

impl MatrixColumn {
    pub fn new(expiry: NaiveDate, side: ColumnSide) -> Self {
        let date = expiry.format("%Y-%m-%d");
        let label = match side {
            ColumnSide::Call => format!("{date} {}", OptionType::Call.label()),
            ColumnSide::Put => format!("{date} {}", OptionType::Put.label()),
            ColumnSide::Both => format!(
                "{date} {} | {}",
                OptionType::Call.label(),
                OptionType::Put.label()
            ),
        };
        MatrixColumn {
            expiry,
            side,
            label,
        }
    }
}

/// Quotes held by one (strike, column) cell. In split mode only the side
/// matching the column is ever set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatrixCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<Quote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Quote>,
}

impl MatrixCell {
    pub fn is_empty(&self) -> bool {
        self.call.is_none() && self.put.is_none()
    }

    pub fn quote(&self, option_type: OptionType) -> Option<&Quote> {
        match option_type {
            OptionType::Call => self.call.as_ref(),
            OptionType::Put => self.put.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatrixRow {
    /// Strike exactly as it appeared in the data.
    pub strike: Decimal,
    /// One cell per entry of `Matrix::columns`.
    pub cells: Vec<MatrixCell>,
}

/// Strikes down, expiries across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Matrix {
    pub symbol: String,
    pub mode: DisplayMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    /// Distinct expiries present after filtering, ascending.
    pub expiries: Vec<NaiveDate>,
    pub columns: Vec<MatrixColumn>,
    /// Ascending by strike, no duplicates.
    pub rows: Vec<MatrixRow>,
}

impl Matrix {
    pub fn empty(symbol: impl Into<String>, mode: DisplayMode, range: Option<DateRange>) -> Self {
        Matrix {
            symbol: symbol.into(),
            mode,
            range,
            expiries: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Column header list, paired 1:1 with `columns` (Strike excluded).
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).collect()
    }

    pub fn strikes(&self) -> Vec<Decimal> {
        self.rows.iter().map(|r| r.strike).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Quote at (strike, expiry, side), if the matrix has one.
    pub fn quote(
        &self,
        strike: Decimal,
        expiry: NaiveDate,
        option_type: OptionType,
    ) -> Option<&Quote> {
        let row = self.rows.iter().find(|r| r.strike == strike)?;
        self.columns
            .iter()
            .zip(&row.cells)
            .filter(|(col, _)| col.expiry == expiry && col.side.includes(option_type))
            .find_map(|(_, cell)| cell.quote(option_type))
    }
}
