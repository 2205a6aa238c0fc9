use tasker_scheduler::RecurrenceError;
use thiserror::Error;

/// Errors that can occur during task storage operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No task with the given ID exists.
    #[error("task not found: {id}")]
    NotFound { id: String },

    /// The submitted task is malformed (missing title, bad date, bad id …).
    #[error("{0}")]
    Validation(String),

    /// The task's repeat rule could not be evaluated.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    /// Another thread panicked while holding the connection lock.
    #[error("task store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, TaskError>;
