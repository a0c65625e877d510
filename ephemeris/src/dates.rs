//! Calendar date parsing and long-form captions.
//!
//! Only calendar components are used: an ISO date is never shifted through a
//! local timezone, so `2025-12-25` is always the 25th regardless of where the
//! renderer runs.

use crate::error::{EphemerisError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Parse the date part of an ISO string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC first) and
/// the `YYYY-MM-DDTHH:MM[:SS]` form produced by datetime-local inputs.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc).date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(local.date());
        }
    }

    Err(EphemerisError::InvalidDate(input.to_string()))
}

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Format an ISO date as `Weekday, 25th Month, Year`.
///
/// ```
/// assert_eq!(
///     ephemeris::format_date("2025-12-25").unwrap(),
///     "Thursday, 25th December, 2025"
/// );
/// ```
pub fn format_date(input: &str) -> Result<String> {
    let date = parse_iso_date(input)?;
    Ok(format!(
        "{}, {}{} {}, {}",
        date.format("%A"),
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%B"),
        date.year()
    ))
}

/// `YYYY-MM-DD` representation used in export filenames
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
