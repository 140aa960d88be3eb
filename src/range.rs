//! Default and user-selected expiry windows.

use chrono::{Months, NaiveDate};

use crate::error::MatrixResult;
use crate::model::DateRange;
use crate::normalize::NormalizedTable;

/// Length of the default window.
pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// Distinct expiries, ascending, for one symbol or (with `None`) the whole
/// dataset.
pub fn available_expiries(table: &NormalizedTable, symbol: Option<&str>) -> Vec<NaiveDate> {
    let symbol = symbol.map(|s| s.trim().to_uppercase());
    let mut expiries: Vec<NaiveDate> = table
        .contracts()
        .iter()
        .filter(|c| symbol.as_deref().is_none_or(|s| c.symbol == s))
        .map(|c| c.expiry_date)
        .collect();
    expiries.sort_unstable();
    expiries.dedup();
    expiries
}

/// Default window over `expiries` (any order, duplicates allowed).
///
/// Starts at the earliest expiry on or after `today`, falling back to the
/// earliest overall, and runs twelve calendar months, clamped to the last
/// expiry. `None` when there are no expiries.
pub fn default_range(expiries: &[NaiveDate], today: NaiveDate) -> Option<DateRange> {
    let first = *expiries.iter().min()?;
    let last = *expiries.iter().max()?;

    let start = expiries
        .iter()
        .copied()
        .filter(|d| *d >= today)
        .min()
        .unwrap_or(first);
    let end = window_end(start, last);
    Some(DateRange::new(start, end).unwrap_or_else(|_| DateRange::single(start)))
}

/// Combine user bounds with the defaults. A supplied side overrides its
/// default and is clamped into `[first expiry, last expiry]`; a supplied
/// start without an end gets the usual twelve-month window.
pub fn resolve_range(
    expiries: &[NaiveDate],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> MatrixResult<Option<DateRange>> {
    let (Some(first), Some(last)) = (expiries.iter().min(), expiries.iter().max()) else {
        return Ok(None);
    };
    let (first, last) = (*first, *last);

    let start = match from {
        Some(d) => d.max(first),
        None => match default_range(expiries, today) {
            Some(range) => range.start(),
            None => return Ok(None),
        },
    };
    let end = match to {
        Some(d) => d.min(last),
        None => window_end(start, last),
    };
    DateRange::new(start, end).map(Some)
}

fn window_end(start: NaiveDate, last: NaiveDate) -> NaiveDate {
    start
        .checked_add_months(Months::new(DEFAULT_WINDOW_MONTHS))
        .map_or(last, |d| d.min(last))
}
