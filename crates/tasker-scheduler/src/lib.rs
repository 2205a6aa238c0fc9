//! `tasker-scheduler` — repeat-rule engine for scheduled tasks.
//!
//! # Overview
//!
//! Given a reference date ("today"), a task's anchor date and its repeat rule,
//! [`next_date`] returns the next date the task falls due. The engine is pure:
//! no clock, no I/O, no shared state.
//!
//! # Rule grammar
//!
//! | Rule                | Behaviour                                                  |
//! |---------------------|------------------------------------------------------------|
//! | `y`                 | Every year on the anchor's month and day                   |
//! | `d <N>`             | Every N days from the anchor, 1 ≤ N ≤ 400                  |
//! | `w <list>`          | On the listed weekdays, 1 = Monday … 7 = Sunday            |
//! | `m <days> [months]` | On the listed days (`-1` last, `-2` second-to-last) of the listed months |
//!
//! Dates travel as `YYYYMMDD` strings.

pub mod date;
pub mod error;
pub mod rule;
pub mod schedule;
pub mod types;

pub use date::{format_date, last_day_of_month, parse_date};
pub use error::{RecurrenceError, Result};
pub use rule::parse_rule;
pub use schedule::{advance, next_date};
pub use types::{DaySelector, RecurrenceRule};
