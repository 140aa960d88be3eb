//! Long-to-wide reshape: one row per strike, one or two columns per expiry.

mod index;

pub use index::QuoteIndex;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::format::Quote;
use crate::model::{
    ColumnSide, Contract, DateRange, DisplayMode, Matrix, MatrixCell, MatrixColumn, MatrixRow,
    OptionType, PriceField,
};
use crate::normalize::NormalizedTable;

/// What to pivot and how.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRequest {
    /// Underlying symbol; matched against the upper-cased column.
    pub symbol: String,
    /// Inclusive expiry window; `None` keeps every expiry.
    pub range: Option<DateRange>,
    pub mode: DisplayMode,
    pub price: PriceField,
}

impl PivotRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        PivotRequest {
            symbol: symbol.into(),
            range: None,
            mode: DisplayMode::Split,
            price: PriceField::Last,
        }
    }

    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.range = range;
        self
    }

    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_price(mut self, price: PriceField) -> Self {
        self.price = price;
        self
    }
}

/// Build the strike x expiry matrix for one symbol.
///
/// An unknown symbol or an empty window gives an empty matrix, not an
/// error. When several contracts share (strike, expiry, type) the first in
/// table order fills the cell.
pub fn pivot(table: &NormalizedTable, request: &PivotRequest) -> Matrix {
    let symbol = request.symbol.trim().to_uppercase();
    let filtered = table.contracts().iter().filter(|c| {
        c.symbol == symbol && request.range.is_none_or(|r| r.contains(c.expiry_date))
    });
    let index = QuoteIndex::build(filtered);

    if index.strikes().is_empty() {
        info!(symbol = %symbol, "no contracts match selection");
        return Matrix::empty(symbol, request.mode, request.range);
    }
    if index.duplicates() > 0 {
        debug!(
            symbol = %symbol,
            duplicates = index.duplicates(),
            "duplicate contracts ignored, first occurrence kept"
        );
    }

    // Pass 1: the full column set.
    let columns: Vec<MatrixColumn> = index
        .expiries()
        .iter()
        .flat_map(|&expiry| {
            column_sides(request.mode).map(move |side| MatrixColumn::new(expiry, side))
        })
        .collect();

    // Pass 2: fill rows in strike order.
    let fill = |&strike: &Decimal| build_row(&index, &columns, strike, request.price);
    #[cfg(feature = "full")]
    let rows: Vec<MatrixRow> = {
        use rayon::prelude::*;
        index.strikes().par_iter().map(fill).collect()
    };
    #[cfg(not(feature = "full"))]
    let rows: Vec<MatrixRow> = index.strikes().iter().map(fill).collect();

    debug!(
        symbol = %symbol,
        strikes = rows.len(),
        expiries = index.expiries().len(),
        columns = columns.len(),
        "pivoted matrix"
    );

    Matrix {
        symbol,
        mode: request.mode,
        range: request.range,
        expiries: index.expiries().to_vec(),
        columns,
        rows,
    }
}

fn column_sides(mode: DisplayMode) -> impl Iterator<Item = ColumnSide> {
    let sides: &'static [ColumnSide] = match mode {
        DisplayMode::Split => &[ColumnSide::Call, ColumnSide::Put],
        DisplayMode::Combined => &[ColumnSide::Both],
    };
    sides.iter().copied()
}

fn build_row(
    index: &QuoteIndex<'_>,
    columns: &[MatrixColumn],
    strike: Decimal,
    price: PriceField,
) -> MatrixRow {
    let quote = |contract: Option<&Contract>| contract.and_then(|c| Quote::from_contract(c, price));

    let cells = columns
        .iter()
        .map(|col| {
            let mut cell = MatrixCell::default();
            for option_type in OptionType::ALL {
                if !col.side.includes(option_type) {
                    continue;
                }
                let q = quote(index.get(col.expiry, strike, option_type));
                match option_type {
                    OptionType::Call => cell.call = q,
                    OptionType::Put => cell.put = q,
                }
            }
            cell
        })
        .collect();

    MatrixRow { strike, cells }
}

