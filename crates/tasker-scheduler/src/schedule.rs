use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::date::{add_years, format_date, last_day_of_month, parse_date};
use crate::error::{RecurrenceError, Result};
use crate::rule::parse_rule;
use crate::types::RecurrenceRule;

/// A yearly candidate may not land more than this many years past the reference.
pub const YEARLY_LIMIT_YEARS: i32 = 100;
/// A day-count candidate may not land more than this many years past the anchor.
pub const INTERVAL_LIMIT_YEARS: i32 = 5;
/// Days scanned after the reference date for a weekly rule.
pub const WEEKLY_WINDOW_DAYS: usize = 14;
/// Days scanned after the reference date for a monthly rule.
pub const MONTHLY_WINDOW_DAYS: usize = 366;

/// Compute the next occurrence for rule text `rule` anchored at `anchor`.
///
/// Returns `Ok(None)` when the rule is empty (the task does not repeat) and
/// `Ok(Some("YYYYMMDD"))` otherwise.
pub fn next_date(reference: NaiveDate, anchor: &str, rule: &str) -> Result<Option<String>> {
    let anchor = parse_date(anchor)?;
    let Some(parsed) = parse_rule(rule)? else {
        return Ok(None);
    };
    let next = advance(&parsed, anchor, reference)?;
    debug!(kind = parsed.kind(), %anchor, %reference, %next, "next occurrence computed");
    Ok(Some(format_date(next)))
}

/// Find the next date satisfying `rule`, searching from `anchor` forward.
///
/// Yearly and day-count rules step from the anchor until the candidate is
/// after `reference`; an anchor already after `reference` is returned as-is.
/// Weekly and monthly rules scan the days following `reference`.
pub fn advance(rule: &RecurrenceRule, anchor: NaiveDate, reference: NaiveDate) -> Result<NaiveDate> {
    match rule {
        RecurrenceRule::Yearly => next_yearly(anchor, reference),

        RecurrenceRule::EveryNDays { n } => next_every_n_days(anchor, reference, *n),

        RecurrenceRule::WeeklyOnDays { days } => scan_after(reference, WEEKLY_WINDOW_DAYS, |date| {
            days.contains(&date.weekday().number_from_monday())
        })
        .ok_or_else(|| {
            RecurrenceError::NoMatch(format!(
                "no weekday from rule {rule} within {WEEKLY_WINDOW_DAYS} days after {reference}"
            ))
        }),

        RecurrenceRule::MonthlyOnDays { days, months } => {
            scan_after(reference, MONTHLY_WINDOW_DAYS, |date| {
                if !months.contains(&date.month()) {
                    return false;
                }
                let Some(last_day) = last_day_of_month(date.year(), date.month()) else {
                    return false;
                };
                days.iter().any(|sel| sel.matches(date.day(), last_day))
            })
            .ok_or_else(|| {
                RecurrenceError::NoMatch(format!(
                    "no date matching rule {rule} within {MONTHLY_WINDOW_DAYS} days after {reference}"
                ))
            })
        }
    }
}

fn next_yearly(anchor: NaiveDate, reference: NaiveDate) -> Result<NaiveDate> {
    let limit = reference.year().saturating_add(YEARLY_LIMIT_YEARS);
    let exceeded = || {
        RecurrenceError::SearchExceeded(format!(
            "yearly repeat from {anchor} passed year {limit}"
        ))
    };

    let mut candidate = anchor;
    let mut years = 0;
    while candidate <= reference {
        years += 1;
        // Step from the anchor, not the previous candidate, so a Feb 29
        // anchor comes back to Feb 29 in leap years.
        candidate = add_years(anchor, years).ok_or_else(exceeded)?;
        if candidate.year() > limit {
            return Err(exceeded());
        }
    }
    Ok(candidate)
}

fn next_every_n_days(anchor: NaiveDate, reference: NaiveDate, n: u32) -> Result<NaiveDate> {
    // Same calendar stepping as yearly rules: a Feb 29 anchor is bounded by Mar 1.
    let limit = add_years(anchor, INTERVAL_LIMIT_YEARS).unwrap_or(NaiveDate::MAX);
    let exceeded = || {
        RecurrenceError::SearchExceeded(format!(
            "every {n} days from {anchor} passed {limit} before reaching {reference}"
        ))
    };

    let mut candidate = anchor;
    while candidate <= reference {
        candidate = candidate
            .checked_add_days(Days::new(u64::from(n)))
            .filter(|next| *next <= limit)
            .ok_or_else(exceeded)?;
    }
    Ok(candidate)
}

/// First date in the `window` days after `reference` accepted by `accept`.
fn scan_after(
    reference: NaiveDate,
    window: usize,
    accept: impl Fn(NaiveDate) -> bool,
) -> Option<NaiveDate> {
    reference
        .iter_days()
        .skip(1)
        .take(window)
        .find(|date| accept(*date))
}
