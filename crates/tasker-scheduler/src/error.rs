use thiserror::Error;

/// Errors produced while parsing or evaluating a repeat rule.
///
/// Every variant is terminal for the call; callers surface the message to
/// the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// The anchor date is not a valid `YYYYMMDD` calendar date.
    #[error("Invalid date: {0}")]
    InvalidAnchorDate(String),

    /// The rule names a known kind but its parameters are malformed.
    #[error("Invalid repeat rule: {0}")]
    InvalidRule(String),

    /// The rule text matches none of the supported kinds.
    #[error("Unsupported repeat rule: {0}")]
    UnsupportedRule(String),

    /// Yearly or day-count stepping ran past its safety bound.
    #[error("Search limit exceeded: {0}")]
    SearchExceeded(String),

    /// Weekly or monthly scan found nothing inside its window.
    #[error("No matching date: {0}")]
    NoMatch(String),
}

impl RecurrenceError {
    /// Short error code string, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            RecurrenceError::InvalidAnchorDate(_) => "INVALID_DATE",
            RecurrenceError::InvalidRule(_) => "INVALID_RULE",
            RecurrenceError::UnsupportedRule(_) => "UNSUPPORTED_RULE",
            RecurrenceError::SearchExceeded(_) => "SEARCH_EXCEEDED",
            RecurrenceError::NoMatch(_) => "NO_MATCH",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
