use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskerError {
    /// Short error code string, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            TaskerError::Config(_) => "CONFIG_ERROR",
            TaskerError::Database(_) => "DATABASE_ERROR",
            TaskerError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskerError>;
