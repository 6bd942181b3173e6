//! Local-calendar date helpers.
//!
//! Every date key in the system is a zero-padded `YYYY-MM-DD` string for a
//! *local* wall-clock calendar day. Keys derived from UTC must never be mixed
//! in; all generation and parsing goes through this module.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Calendar day as a `YYYY-MM-DD` string in local time.
pub type DateKey = String;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Today's local calendar day as a date key.
pub fn today_key() -> DateKey {
    to_date_key(today())
}

/// Today's local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format an arbitrary date as a date key, discarding time-of-day.
pub fn to_date_key(date: NaiveDate) -> DateKey {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a date key back into a date. Returns `None` for malformed input;
/// callers at the normalization boundary drop such entries.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// The `n` calendar days ending today inclusive, oldest first.
///
/// Used by calendar/heatmap consumers that render a trailing window.
pub fn last_n_dates(n: usize) -> Vec<NaiveDate> {
    let today = today();
    (0..n)
        .rev()
        .map(|i| today - Duration::days(i as i64))
        .collect()
}

/// Weekday index with 0=Sunday .. 6=Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Short weekday name for a 0=Sunday .. 6=Saturday index.
pub fn weekday_name(index: u8) -> &'static str {
    const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    NAMES[index as usize % 7]
}
