//! `YYYYMMDD` calendar-date helpers shared by the parser, the advancer and
//! the storage layer.

use chrono::{Datelike, NaiveDate};

use crate::error::{RecurrenceError, Result};

/// chrono format string for the wire date representation.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parse an 8-digit `YYYYMMDD` string into a calendar date.
///
/// Anything that is not exactly eight ASCII digits naming a real Gregorian
/// date is rejected with [`RecurrenceError::InvalidAnchorDate`].
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let invalid = || RecurrenceError::InvalidAnchorDate(format!("{text:?} is not a YYYYMMDD date"));

    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year: i32 = text[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = text[4..6].parse().map_err(|_| invalid())?;
    let day: u32 = text[6..8].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Render a date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Number of the last day of `month` in `year` (28–31).
///
/// Computed as the day before the first of the following month, so leap
/// years come out right. Returns `None` for a month outside 1..=12.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// `date` moved `years` calendar years forward.
///
/// Feb 29 lands on Mar 1 when the target year is not a leap year.
pub(crate) fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}
