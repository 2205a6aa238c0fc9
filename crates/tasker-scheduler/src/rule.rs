//! Repeat-rule text → [`RecurrenceRule`].

use std::collections::BTreeSet;

use crate::error::{RecurrenceError, Result};
use crate::types::{DaySelector, RecurrenceRule, MAX_DAY_INTERVAL};

/// Parse repeat-rule text.
///
/// Surrounding whitespace is ignored. Empty text means "does not repeat" and
/// yields `Ok(None)`. The first whitespace-separated token picks the rule kind;
/// an unknown token is [`RecurrenceError::UnsupportedRule`], while a known
/// token with bad parameters is [`RecurrenceError::InvalidRule`].
pub fn parse_rule(text: &str) -> Result<Option<RecurrenceRule>> {
    let text = text.trim();
    let fields: Vec<&str> = text.split_whitespace().collect();
    let Some((&kind, params)) = fields.split_first() else {
        return Ok(None);
    };

    let rule = match kind {
        "y" => {
            expect_params(text, params, 0, 0)?;
            RecurrenceRule::Yearly
        }
        "d" => {
            expect_params(text, params, 1, 1)?;
            let n = params[0]
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_DAY_INTERVAL).contains(n))
                .ok_or_else(|| {
                    RecurrenceError::InvalidRule(format!(
                        "day interval must be an integer from 1 to {MAX_DAY_INTERVAL}, got {:?}",
                        params[0]
                    ))
                })?;
            RecurrenceRule::EveryNDays { n }
        }
        "w" => {
            expect_params(text, params, 1, 1)?;
            let days = parse_list(params[0], "weekday", |n| {
                (1..=7).contains(&n).then_some(n as u32)
            })?;
            RecurrenceRule::WeeklyOnDays { days }
        }
        "m" => {
            expect_params(text, params, 1, 2)?;
            let days = parse_list(params[0], "day of month", DaySelector::from_number)?;
            let months = match params.get(1) {
                Some(list) => parse_list(list, "month", |n| {
                    (1..=12).contains(&n).then_some(n as u32)
                })?,
                None => (1..=12).collect(),
            };
            RecurrenceRule::MonthlyOnDays { days, months }
        }
        _ => return Err(RecurrenceError::UnsupportedRule(format!("{text:?}"))),
    };

    Ok(Some(rule))
}

fn expect_params(text: &str, params: &[&str], min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&params.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(RecurrenceError::InvalidRule(format!(
        "{text:?} expects {expected} parameter(s), got {}",
        params.len()
    )))
}

/// Parse a comma-separated integer list, mapping each entry through `accept`.
fn parse_list<T: Ord>(
    list: &str,
    what: &str,
    accept: impl Fn(i32) -> Option<T>,
) -> Result<BTreeSet<T>> {
    list.split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse::<i32>()
                .ok()
                .and_then(&accept)
                .ok_or_else(|| RecurrenceError::InvalidRule(format!("invalid {what}: {entry:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> RecurrenceRule {
        parse_rule(text).unwrap().unwrap()
    }

    fn invalid(text: &str) {
        let err = parse_rule(text).unwrap_err();
        assert!(
            matches!(err, RecurrenceError::InvalidRule(_)),
            "{text:?} should be InvalidRule, got {err:?}"
        );
    }

    #[test]
    fn empty_means_no_recurrence() {
        assert_eq!(parse_rule("").unwrap(), None);
        assert_eq!(parse_rule("   \t").unwrap(), None);
    }

    #[test]
    fn parses_each_kind() {
        assert_eq!(parse(" y "), RecurrenceRule::Yearly);
        assert_eq!(parse("d 1"), RecurrenceRule::EveryNDays { n: 1 });
        assert_eq!(parse("d 400"), RecurrenceRule::EveryNDays { n: 400 });
        assert_eq!(parse("w 1,3"), RecurrenceRule::WeeklyOnDays { days: [1, 3].into() });
        assert_eq!(
            parse("m -1 2"),
            RecurrenceRule::MonthlyOnDays {
                days: [DaySelector::Last].into(),
                months: [2].into(),
            }
        );
    }

    #[test]
    fn monthly_without_months_allows_all() {
        match parse("m 1,-2") {
            RecurrenceRule::MonthlyOnDays { days, months } => {
                assert_eq!(days, [DaySelector::Day(1), DaySelector::SecondToLast].into());
                assert_eq!(months.len(), 12);
            }
            other => panic!("expected monthly rule, got {other:?}"),
        }
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(parse("w 2,2,2").to_string(), "w 2");
    }

    #[test]
    fn day_interval_bounds() {
        invalid("d 0");
        invalid("d 401");
        invalid("d -5");
        invalid("d x");
        invalid("d");
        invalid("d 1 2");
    }

    #[test]
    fn weekday_bounds() {
        invalid("w 0");
        invalid("w 8");
        invalid("w 1,,2");
        invalid("w ,");
        invalid("w");
        invalid("w 1 2");
    }

    #[test]
    fn monthly_bounds() {
        invalid("m 0");
        invalid("m -3");
        invalid("m 32");
        invalid("m 1 13");
        invalid("m 1 0");
        invalid("m 1 1 1");
        invalid("m");
        invalid("m a");
    }

    #[test]
    fn yearly_takes_no_parameters() {
        invalid("y 2");
    }

    #[test]
    fn unknown_kinds_are_unsupported() {
        for text in ["q", "x 1", "daily", "Y", "D 5", "1"] {
            let err = parse_rule(text).unwrap_err();
            assert!(
                matches!(err, RecurrenceError::UnsupportedRule(_)),
                "{text:?} should be UnsupportedRule, got {err:?}"
            );
        }
    }
}
