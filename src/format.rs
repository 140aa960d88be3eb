use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{ColumnSide, Contract, MatrixCell, PriceField};

/// A matched contract reduced to what a cell shows. Ticker and price stay
/// separate so structured renderers never have to re-parse display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Quote {
    pub short_ticker: String,
    pub price: Decimal,
}

impl Quote {
    /// `None` when the contract has no usable price. Non-positive prices
    /// count as "no quote", never as zero.
    pub fn from_contract(contract: &Contract, field: PriceField) -> Option<Self> {
        let price = contract.price(field)?;
        if price <= Decimal::ZERO {
            return None;
        }
        Some(Quote {
            short_ticker: contract.short_ticker.clone().unwrap_or_default(),
            price,
        })
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&CellFormat::default().token(self))
    }
}

/// Fixed-width layout of a text cell: `<ticker> <price>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFormat {
    /// Minimum ticker width; the ticker is left-aligned and never cut.
    pub ticker_width: usize,
    /// Minimum price width; the price is right-aligned.
    pub price_width: usize,
}

impl Default for CellFormat {
    fn default() -> Self {
        CellFormat {
            ticker_width: 6,
            price_width: 6,
        }
    }
}

impl CellFormat {
    pub fn token(&self, quote: &Quote) -> String {
        format!(
            "{:<tw$} {:>pw$}",
            quote.short_ticker,
            fixed2(quote.price),
            tw = self.ticker_width,
            pw = self.price_width,
        )
    }

    /// Blank placeholder as wide as a minimal token.
    pub fn blank(&self) -> String {
        " ".repeat(self.ticker_width + 1 + self.price_width)
    }

    /// Text for one matrix cell. Empty cells render as an empty string.
    pub fn render(&self, cell: &MatrixCell, side: ColumnSide) -> String {
        match side {
            ColumnSide::Call => cell.call.as_ref().map(|q| self.token(q)).unwrap_or_default(),
            ColumnSide::Put => cell.put.as_ref().map(|q| self.token(q)).unwrap_or_default(),
            ColumnSide::Both => {
                if cell.is_empty() {
                    return String::new();
                }
                let call = cell.call.as_ref().map_or_else(|| self.blank(), |q| self.token(q));
                let put = cell.put.as_ref().map_or_else(|| self.blank(), |q| self.token(q));
                format!("{call} | {put}").trim_end().to_string()
            }
        }
    }
}

/// Two-decimal rendering, half away from zero.
pub fn fixed2(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
