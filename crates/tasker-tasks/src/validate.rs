//! Validation applied to task fields before they reach the database.

use chrono::NaiveDate;
use tasker_scheduler::{format_date, next_date, parse_date};

use crate::error::{Result, TaskError};
use crate::types::{TaskDraft, MAX_REPEAT_LEN};

/// Check and normalise a submitted task against `today`.
///
/// - the title must be non-blank (surrounding whitespace is dropped);
/// - an empty date becomes `today`, any other date must be a valid
///   `YYYYMMDD` no earlier than `today`;
/// - a non-empty repeat rule must fit the column and evaluate cleanly.
pub fn prepare(draft: TaskDraft, today: NaiveDate) -> Result<TaskDraft> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(TaskError::Validation("task title is required".to_string()));
    }

    let date = match draft.date.trim() {
        "" => today,
        text => parse_date(text)
            .map_err(|_| TaskError::Validation(format!("invalid task date {text:?}, expected YYYYMMDD")))?,
    };
    if date < today {
        return Err(TaskError::Validation(format!(
            "task date {} is earlier than today ({})",
            format_date(date),
            format_date(today)
        )));
    }
    let date = format_date(date);

    let repeat = draft.repeat.trim();
    if repeat.len() > MAX_REPEAT_LEN {
        return Err(TaskError::Validation(format!(
            "repeat rule is longer than {MAX_REPEAT_LEN} characters"
        )));
    }
    // Evaluating the rule catches unsatisfiable rules as well as malformed ones.
    next_date(today, &date, repeat)?;

    Ok(TaskDraft {
        date,
        title: title.to_string(),
        comment: draft.comment,
        repeat: repeat.to_string(),
    })
}
