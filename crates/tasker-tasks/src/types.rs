use serde::{Deserialize, Serialize};

/// Longest repeat rule the `scheduler` table accepts.
pub const MAX_REPEAT_LEN: usize = 128;

/// A persisted task.
///
/// `id` is the SQLite rowid rendered as a string, which is how clients see it
/// on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    /// Due date, `YYYYMMDD`.
    pub date: String,
    pub title: String,
    pub comment: String,
    /// Repeat rule text; empty for one-off tasks.
    pub repeat: String,
}

impl Task {
    /// Whether the task comes back after being marked done.
    pub fn is_recurring(&self) -> bool {
        !self.repeat.trim().is_empty()
    }

    /// The editable fields of this task.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            date: self.date.clone(),
            title: self.title.clone(),
            comment: self.comment.clone(),
            repeat: self.repeat.clone(),
        }
    }

    /// Combine an id with already-validated fields.
    pub fn from_draft(id: impl Into<String>, draft: TaskDraft) -> Self {
        Self {
            id: id.into(),
            date: draft.date,
            title: draft.title,
            comment: draft.comment,
            repeat: draft.repeat,
        }
    }
}

/// Task fields as submitted by a client, before validation.
///
/// Every field defaults to empty so a missing title is reported as a
/// validation error rather than a JSON decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDraft {
    /// `YYYYMMDD`; empty means "today".
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_wire_format() {
        let task = Task {
            id: "7".into(),
            date: "20240115".into(),
            title: "Pay rent".into(),
            comment: String::new(),
            repeat: "m 1".into(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""id":"7""#));
        assert!(json.contains(r#""repeat":"m 1""#));
        assert!(task.is_recurring());
    }

    #[test]
    fn draft_fields_default_to_empty() {
        let draft: TaskDraft = serde_json::from_str(r#"{"title":"Call mum"}"#).unwrap();
        assert_eq!(draft.title, "Call mum");
        assert!(draft.date.is_empty());
        assert!(draft.repeat.is_empty());
    }
}
