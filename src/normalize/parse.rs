//! Cell-level parsers shared by the validator and the normalizer.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%Y%m%d",
    "%d-%b-%y",
    "%d %b %y",
    "%m/%d/%y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// `%Y` takes one to four digits, so "24" would otherwise be year 24.
const MIN_YEAR: i32 = 1000;

/// Spreadsheet day zero (serial 1 is 1899-12-31).
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial for 1950-01-01. Smaller numbers are more likely years or counts.
const MIN_SERIAL: f64 = 18_264.0;

/// Serials at or above this look like `YYYYMMDD` and are not treated as days.
const MAX_SERIAL: f64 = 100_000.0;

/// Parse a decimal. Commas are accepted only as thousands groupings
/// (`1,234,567.5`); a decimal comma such as `3,25` is not a number.
/// Empty input is `None`.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned = if s.contains(',') {
        ungroup_thousands(s)?
    } else {
        s.to_string()
    };
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// `-1,234.5` -> `-1234.5`; `None` unless every group after the first has
/// exactly three digits.
fn ungroup_thousands(s: &str) -> Option<String> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac) = match rest.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rest, None),
    };
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());

    let mut groups = int_part.split(',');
    let lead = groups.next()?;
    if !all_digits(lead) || lead.len() > 3 {
        return None;
    }
    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(frac) = frac {
        if !all_digits(frac) {
            return None;
        }
        digits.push('.');
        digits.push_str(frac);
    }
    Some(format!("{sign}{digits}"))
}

/// Parse an expiry into a calendar date; any time of day is dropped.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok().filter(full_year))
    {
        return Some(d);
    }
    if let Some(d) = DATETIME_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .map(|dt| dt.date())
            .filter(full_year)
    }) {
        return Some(d);
    }
    if let Some(d) = DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
        .filter(full_year)
    {
        return Some(d);
    }
    parse_serial_date(s)
}

fn full_year(date: &NaiveDate) -> bool {
    date.year() >= MIN_YEAR
}

fn parse_serial_date(s: &str) -> Option<NaiveDate> {
    let serial: f64 = s.parse().ok()?;
    if !(MIN_SERIAL..MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Drop the fixed-length prefix of an option ticker. Short tickers yield "".
pub fn short_ticker(ticker: &str, prefix_len: usize) -> String {
    ticker.trim().chars().skip(prefix_len).collect()
}
