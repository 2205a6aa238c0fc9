use std::collections::BTreeSet;
use std::fmt;

/// Largest step accepted by a `d <N>` rule.
pub const MAX_DAY_INTERVAL: u32 = 400;

/// One entry of the day list in an `m` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DaySelector {
    /// A fixed day of the month, 1..=31.
    Day(u32),
    /// `-1`: the last calendar day of the month.
    Last,
    /// `-2`: the day before the last calendar day of the month.
    SecondToLast,
}

impl DaySelector {
    /// Map the rule-text number onto a selector. Zero, values below -2 and
    /// values above 31 have no selector.
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            -2 => Some(DaySelector::SecondToLast),
            -1 => Some(DaySelector::Last),
            1..=31 => Some(DaySelector::Day(n as u32)),
            _ => None,
        }
    }

    /// The number this selector is written as in rule text.
    pub fn number(self) -> i32 {
        match self {
            DaySelector::Day(d) => d as i32,
            DaySelector::Last => -1,
            DaySelector::SecondToLast => -2,
        }
    }

    /// Whether `day` matches in a month whose last day is `last_day`.
    pub fn matches(self, day: u32, last_day: u32) -> bool {
        match self {
            DaySelector::Day(d) => d == day,
            DaySelector::Last => day == last_day,
            DaySelector::SecondToLast => day + 1 == last_day,
        }
    }
}

/// A parsed repeat rule.
///
/// | Text                  | Variant          |
/// |-----------------------|------------------|
/// | `y`                   | `Yearly`         |
/// | `d 7`                 | `EveryNDays`     |
/// | `w 1,3,5`             | `WeeklyOnDays`   |
/// | `m 1,15,-1 [3,6,9]`   | `MonthlyOnDays`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    /// Same month and day every year.
    Yearly,

    /// Every `n` days counted from the anchor, 1 ≤ n ≤ 400.
    EveryNDays { n: u32 },

    /// On the given ISO weekdays (1 = Monday … 7 = Sunday). Never empty.
    WeeklyOnDays { days: BTreeSet<u32> },

    /// On the given days of the given months (1..=12). Neither set is empty;
    /// `months` holds all twelve when the rule text omits them.
    MonthlyOnDays {
        days: BTreeSet<DaySelector>,
        months: BTreeSet<u32>,
    },
}

impl RecurrenceRule {
    /// Short name of the rule kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RecurrenceRule::Yearly => "yearly",
            RecurrenceRule::EveryNDays { .. } => "every_n_days",
            RecurrenceRule::WeeklyOnDays { .. } => "weekly",
            RecurrenceRule::MonthlyOnDays { .. } => "monthly",
        }
    }
}

fn join<I: IntoIterator<Item = i32>>(items: I) -> String {
    items
        .into_iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Canonical rule text: sorted, de-duplicated, months omitted when all twelve
/// are allowed.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Yearly => f.write_str("y"),
            RecurrenceRule::EveryNDays { n } => write!(f, "d {n}"),
            RecurrenceRule::WeeklyOnDays { days } => {
                write!(f, "w {}", join(days.iter().map(|d| *d as i32)))
            }
            RecurrenceRule::MonthlyOnDays { days, months } => {
                write!(f, "m {}", join(days.iter().map(|d| d.number())))?;
                if months.len() < 12 {
                    write!(f, " {}", join(months.iter().map(|m| *m as i32)))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_numbers() {
        assert_eq!(DaySelector::from_number(-2), Some(DaySelector::SecondToLast));
        assert_eq!(DaySelector::from_number(-1), Some(DaySelector::Last));
        assert_eq!(DaySelector::from_number(31), Some(DaySelector::Day(31)));
        assert_eq!(DaySelector::from_number(0), None);
        assert_eq!(DaySelector::from_number(-3), None);
        assert_eq!(DaySelector::from_number(32), None);
        assert_eq!(DaySelector::Last.number(), -1);
    }

    #[test]
    fn selector_matching() {
        assert!(DaySelector::Last.matches(29, 29));
        assert!(!DaySelector::Last.matches(28, 29));
        assert!(DaySelector::SecondToLast.matches(28, 29));
        assert!(DaySelector::Day(5).matches(5, 30));
        assert!(!DaySelector::Day(31).matches(30, 30));
    }

    #[test]
    fn display_is_canonical() {
        let rule = RecurrenceRule::MonthlyOnDays {
            days: [DaySelector::Last, DaySelector::Day(15), DaySelector::Day(1)].into(),
            months: (1..=12).collect(),
        };
        assert_eq!(rule.to_string(), "m 1,15,-1");

        let rule = RecurrenceRule::MonthlyOnDays {
            days: [DaySelector::SecondToLast].into(),
            months: [8, 2].into(),
        };
        assert_eq!(rule.to_string(), "m -2 2,8");

        let rule = RecurrenceRule::WeeklyOnDays { days: [7, 1, 3].into() };
        assert_eq!(rule.to_string(), "w 1,3,7");
        assert_eq!(RecurrenceRule::EveryNDays { n: 30 }.to_string(), "d 30");
        assert_eq!(RecurrenceRule::Yearly.to_string(), "y");
    }
}
