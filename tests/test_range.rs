
use options_matrix::range::{self, DEFAULT_WINDOW_MONTHS};
use options_matrix::{DateRange, MatrixError, SchemaVariant};

use sheet_common::*;

// ── Default window ───────────────────────────────────────────────────

#[test]
fn test_window_starts_at_next_expiry_and_runs_twelve_months() {
    let expiries = [ymd(2024, 1, 1), ymd(2024, 3, 1), ymd(2025, 6, 1)];
    let window = range::default_range(&expiries, ymd(2024, 2, 1)).unwrap();
    assert_eq!(window.start(), ymd(2024, 3, 1));
    assert_eq!(window.end(), ymd(2025, 3, 1));
    assert_eq!(DEFAULT_WINDOW_MONTHS, 12);
}

#[test]
fn test_window_accepts_unsorted_input_with_duplicates() {
    let expiries = [ymd(2025, 6, 1), ymd(2024, 3, 1), ymd(2024, 1, 1), ymd(2024, 3, 1)];
    let window = range::default_range(&expiries, ymd(2024, 2, 1)).unwrap();
    assert_eq!(window, DateRange::new(ymd(2024, 3, 1), ymd(2025, 3, 1)).unwrap());
}

#[test]
fn test_expiry_on_today_counts_as_upcoming() {
    let expiries = [ymd(2024, 1, 1), ymd(2024, 2, 1)];
    let window = range::default_range(&expiries, ymd(2024, 2, 1)).unwrap();
    assert_eq!(window, DateRange::single(ymd(2024, 2, 1)));
}

#[test]
fn test_all_expiries_past_falls_back_to_earliest() {
    let expiries = [ymd(2023, 3, 1), ymd(2023, 9, 1), ymd(2024, 6, 1)];
    let window = range::default_range(&expiries, ymd(2025, 1, 1)).unwrap();
    assert_eq!(window.start(), ymd(2023, 3, 1));
    assert_eq!(window.end(), ymd(2024, 3, 1));
}

#[test]
fn test_window_clamped_to_last_expiry() {
    let expiries = [ymd(2024, 3, 1), ymd(2024, 5, 1)];
    let window = range::default_range(&expiries, ymd(2024, 2, 1)).unwrap();
    assert_eq!(window.end(), ymd(2024, 5, 1));
}

#[test]
fn test_single_expiry_gives_single_day_window() {
    let window = range::default_range(&[ymd(2024, 6, 21)], ymd(2030, 1, 1)).unwrap();
    assert_eq!(window, DateRange::single(ymd(2024, 6, 21)));
}

#[test]
fn test_no_expiries_gives_no_window() {
    assert_eq!(range::default_range(&[], ymd(2024, 1, 1)), None);
    assert_eq!(range::resolve_range(&[], None, None, ymd(2024, 1, 1)).unwrap(), None);
}

#[test]
fn test_month_end_start_stays_a_valid_date() {
    let expiries = [ymd(2024, 2, 29), ymd(2026, 1, 1)];
    let window = range::default_range(&expiries, ymd(2024, 2, 1)).unwrap();
    assert_eq!(window.end(), ymd(2025, 2, 28));
}

// ── User bounds ──────────────────────────────────────────────────────

#[test]
fn test_resolve_without_bounds_is_the_default() {
    let expiries = [ymd(2024, 1, 1), ymd(2024, 3, 1), ymd(2025, 6, 1)];
    let today = ymd(2024, 2, 1);
    assert_eq!(
        range::resolve_range(&expiries, None, None, today).unwrap(),
        range::default_range(&expiries, today)
    );
}

#[test]
fn test_resolve_clamps_user_bounds_into_data() {
    let expiries = [ymd(2024, 3, 1), ymd(2024, 9, 1)];
    let window = range::resolve_range(
        &expiries,
        Some(ymd(2023, 1, 1)),
        Some(ymd(2030, 1, 1)),
        ymd(2024, 2, 1),
    )
    .unwrap()
    .unwrap();
    assert_eq!(window, DateRange::new(ymd(2024, 3, 1), ymd(2024, 9, 1)).unwrap());
}

#[test]
fn test_resolve_user_start_gets_default_length() {
    let expiries = [ymd(2024, 1, 1), ymd(2026, 1, 1)];
    let window = range::resolve_range(&expiries, Some(ymd(2024, 4, 15)), None, ymd(2024, 2, 1))
        .unwrap()
        .unwrap();
    assert_eq!(window.start(), ymd(2024, 4, 15));
    assert_eq!(window.end(), ymd(2025, 4, 15));
}

#[test]
fn test_resolve_user_end_keeps_default_start() {
    let expiries = [ymd(2024, 1, 1), ymd(2024, 3, 1), ymd(2025, 6, 1)];
    let window = range::resolve_range(&expiries, None, Some(ymd(2024, 12, 31)), ymd(2024, 2, 1))
        .unwrap()
        .unwrap();
    assert_eq!(window, DateRange::new(ymd(2024, 3, 1), ymd(2024, 12, 31)).unwrap());
}

#[test]
fn test_resolve_rejects_inverted_bounds() {
    let expiries = [ymd(2024, 1, 1), ymd(2025, 1, 1)];
    let err = range::resolve_range(
        &expiries,
        Some(ymd(2024, 9, 1)),
        Some(ymd(2024, 3, 1)),
        ymd(2024, 2, 1),
    )
    .unwrap_err();
    assert!(matches!(err, MatrixError::InvalidRange { .. }));
    assert!(DateRange::new(ymd(2024, 2, 1), ymd(2024, 1, 1)).is_err());
}

// ── Expiries per symbol ──────────────────────────────────────────────

#[test]
fn test_available_expiries_per_symbol() {
    let table = normalized(&sample_broker_sheet(), SchemaVariant::BrokerExtract);
    assert_eq!(
        range::available_expiries(&table, None),
        vec![ymd(2024, 6, 26), ymd(2024, 6, 27), ymd(2024, 7, 25), ymd(2024, 9, 26)]
    );
    assert_eq!(
        range::available_expiries(&table, Some("nifty")),
        vec![ymd(2024, 6, 27), ymd(2024, 7, 25), ymd(2024, 9, 26)]
    );
    assert!(range::available_expiries(&table, Some("SENSEX")).is_empty());
}
