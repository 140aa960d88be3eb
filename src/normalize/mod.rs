//! Rename, clean and type a validated table.
//!
//! Every step is idempotent: feeding a `NormalizedTable`'s table back in
//! under the same layout produces an equal result.

pub mod parse;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{MatrixError, MatrixResult};
use crate::model::{Contract, OptionType, RawTable};
use crate::variant::{
    self, Field, FieldKind, SchemaVariant, MID_PRICE, SHORT_TICKER, TICKER_PREFIX_LEN,
};

/// A table in canonical form plus its typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    variant: SchemaVariant,
    table: RawTable,
    contracts: Vec<Contract>,
}

impl NormalizedTable {
    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Canonical-header table, source column order preserved, derived
    /// columns appended.
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    /// Typed rows in input order.
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Distinct symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.contracts.iter().map(|c| c.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }
}

/// Column positions of each canonical field after renaming.
#[derive(Default)]
struct Columns {
    fields: Vec<(Field, usize)>,
}

impl Columns {
    fn get(&self, field: Field) -> Option<usize> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, i)| *i)
    }

    fn require(&self, field: Field) -> MatrixResult<usize> {
        self.get(field).ok_or_else(|| {
            MatrixError::contract_violation(format!(
                "column `{}` missing after validation",
                field.canonical_name()
            ))
        })
    }
}

/// Normalize `raw`, which must already have passed validation for `variant`.
pub fn normalize(raw: &RawTable, variant: SchemaVariant) -> MatrixResult<NormalizedTable> {
    let mut table = raw.clone();
    let columns = rename_columns(&mut table, variant)?;
    clean_cells(&mut table, &columns)?;
    derive_short_ticker(&mut table, &columns);
    derive_mid_price(&mut table, &columns);
    let contracts = build_contracts(&table, &columns)?;

    debug!(
        variant = %variant,
        rows = contracts.len(),
        columns = table.headers().len(),
        "normalized table"
    );

    Ok(NormalizedTable {
        variant,
        table,
        contracts,
    })
}

/// Step 1: source headers become canonical names.
fn rename_columns(table: &mut RawTable, variant: SchemaVariant) -> MatrixResult<Columns> {
    let mut columns = Columns::default();
    for spec in variant.fields() {
        match variant::find_column(table.headers(), spec) {
            Some(idx) => {
                table.rename_column(idx, spec.field.canonical_name());
                columns.fields.push((spec.field, idx));
            }
            None if spec.required => {
                return Err(MatrixError::contract_violation(format!(
                    "required column `{}` absent from {} table",
                    spec.source, variant
                )));
            }
            None => {}
        }
    }
    Ok(columns)
}

/// Steps 2 and 3: upper-case categorical fields, canonicalize option types
/// and rewrite expiries as ISO dates.
fn clean_cells(table: &mut RawTable, columns: &Columns) -> MatrixResult<()> {
    for &(field, col) in &columns.fields {
        for row in 0..table.len() {
            let cell = table.cell(row, col);
            let cleaned = match field.kind() {
                FieldKind::Upper => cell.trim().to_uppercase(),
                FieldKind::OptionType => OptionType::parse(cell)
                    .ok_or_else(|| {
                        MatrixError::contract_violation(format!(
                            "row {}: unknown option type `{cell}`",
                            row + 1
                        ))
                    })?
                    .as_str()
                    .to_string(),
                FieldKind::Date => parse::parse_date(cell)
                    .ok_or_else(|| {
                        MatrixError::contract_violation(format!(
                            "row {}: unparseable expiry `{cell}`",
                            row + 1
                        ))
                    })?
                    .format("%Y-%m-%d")
                    .to_string(),
                FieldKind::Text | FieldKind::Quantity | FieldKind::Price => continue,
            };
            table.set_cell(row, col, cleaned);
        }
    }
    Ok(())
}

/// Step 4.
fn derive_short_ticker(table: &mut RawTable, columns: &Columns) {
    let Some(src) = columns.get(Field::OptionTicker) else {
        return;
    };
    let dst = table.ensure_column(SHORT_TICKER);
    for row in 0..table.len() {
        let short = parse::short_ticker(table.cell(row, src), TICKER_PREFIX_LEN);
        table.set_cell(row, dst, short);
    }
}

/// Step 5. Rows missing either side get an empty mid.
fn derive_mid_price(table: &mut RawTable, columns: &Columns) {
    let (Some(bid_col), Some(ask_col)) = (columns.get(Field::Bid), columns.get(Field::Ask)) else {
        return;
    };
    let dst = table.ensure_column(MID_PRICE);
    for row in 0..table.len() {
        let bid = parse::parse_decimal(table.cell(row, bid_col));
        let ask = parse::parse_decimal(table.cell(row, ask_col));
        let mid = match (bid, ask) {
            (Some(b), Some(a)) => mid_price(b, a).to_string(),
            _ => String::new(),
        };
        table.set_cell(row, dst, mid);
    }
}

pub fn mid_price(bid: Decimal, ask: Decimal) -> Decimal {
    ((bid + ask) / Decimal::TWO).normalize()
}

fn build_contracts(table: &RawTable, columns: &Columns) -> MatrixResult<Vec<Contract>> {
    let symbol_col = columns.require(Field::Symbol)?;
    let expiry_col = columns.require(Field::ExpiryDate)?;
    let type_col = columns.require(Field::OptionType)?;
    let strike_col = columns.require(Field::Strike)?;
    let short_col = table.column_index(SHORT_TICKER);
    let mid_col = table.column_index(MID_PRICE);

    let text = |row: usize, col: Option<usize>| -> Option<String> {
        col.map(|c| table.cell(row, c).trim().to_string())
            .filter(|s| !s.is_empty())
    };
    // Malformed optional numbers degrade to "no value" rather than failing
    // the whole table.
    let number = |row: usize, field: Field| -> Option<Decimal> {
        let col = columns.get(field)?;
        let cell = table.cell(row, col);
        let value = parse::parse_decimal(cell);
        if value.is_none() && !cell.trim().is_empty() {
            warn!(
                row = row + 1,
                column = field.canonical_name(),
                value = cell,
                "dropping non-numeric value"
            );
        }
        value
    };

    let mut contracts = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let symbol = table.cell(row, symbol_col).to_string();
        if symbol.is_empty() {
            return Err(MatrixError::contract_violation(format!(
                "row {}: empty symbol",
                row + 1
            )));
        }
        let expiry_date = parse::parse_date(table.cell(row, expiry_col)).ok_or_else(|| {
            MatrixError::contract_violation(format!("row {}: expiry not normalized", row + 1))
        })?;
        let option_type = OptionType::parse(table.cell(row, type_col)).ok_or_else(|| {
            MatrixError::contract_violation(format!("row {}: option type not normalized", row + 1))
        })?;
        let strike = parse::parse_decimal(table.cell(row, strike_col))
            .filter(|s| *s >= Decimal::ZERO)
            .ok_or_else(|| {
                MatrixError::contract_violation(format!(
                    "row {}: strike `{}` is not a non-negative number",
                    row + 1,
                    table.cell(row, strike_col)
                ))
            })?;

        contracts.push(Contract {
            option_ticker: text(row, columns.get(Field::OptionTicker)),
            short_ticker: short_col.map(|c| table.cell(row, c).to_string()),
            symbol,
            expiry_date,
            option_type,
            strike,
            style: text(row, columns.get(Field::Style)),
            last_price: number(row, Field::LastPrice),
            bid: number(row, Field::Bid),
            ask: number(row, Field::Ask),
            volume: number(row, Field::Volume),
            open_interest: number(row, Field::OpenInterest),
            mid_price: mid_col.and_then(|c| parse::parse_decimal(table.cell(row, c))),
        });
    }
    Ok(contracts)
}
