//! Match date parsing.
//!
//! The accepted formats are pinned here rather than left to a parser's
//! defaults. Formats are tried in order and the first match wins, so
//! `01/02/2023` is always read month-first (January 2nd).
//!
//! `%Y` accepts any number of digits, so a parsed year below 1000 is
//! rejected. Two-digit years are only read by the explicit `%y` formats
//! (`1/5/23`, `31-Jan-23`); any other short-year date does not parse.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Smallest year accepted from a four-digit `%Y` field.
const MIN_YEAR: i32 = 1000;

/// Date-only formats, tried first.
pub const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m/%d/%y",
    "%d-%b-%y",
];

/// Date-time formats; only the calendar date is kept.
pub const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a match date in any of the accepted formats.
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let full_year = |date: &NaiveDate| date.year() >= MIN_YEAR;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .filter(full_year)
        })
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|fmt| {
                NaiveDateTime::parse_from_str(value, fmt)
                    .ok()
                    .map(|dt| dt.date())
                    .filter(full_year)
            })
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
                .filter(full_year)
        })
}
