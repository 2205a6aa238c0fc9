//! HTTP handlers. JSON endpoints answer errors as `{"error": "..."}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tasker_tasks::TaskError;
use tracing::error;

pub mod health;
pub mod nextdate;
pub mod tasks;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
}

/// Map a storage error onto a status code. Client mistakes are 4xx and keep
/// their message; storage failures are logged and reported as 500.
pub fn task_error(e: TaskError) -> (StatusCode, Json<ApiError>) {
    match e {
        TaskError::NotFound { .. } => api_error(StatusCode::NOT_FOUND, e.to_string()),
        TaskError::Validation(_) | TaskError::Recurrence(_) => {
            api_error(StatusCode::BAD_REQUEST, e.to_string())
        }
        TaskError::Database(_) | TaskError::LockPoisoned => {
            error!(error = %e, "task store failure");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal storage error")
        }
    }
}
