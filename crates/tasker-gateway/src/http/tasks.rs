//! Task endpoints: `/api/task`, `/api/task/done` and `/api/tasks`.
//!
//! Every task body is validated against `AppState::today()` before it is
//! stored, so the clock is read in exactly one place.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tasker_tasks::{prepare, Task, TaskDraft};
use tracing::{info, warn};

use super::{api_error, task_error, ApiResult};
use crate::app::AppState;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /api/task — create a task, responds `201 {"id": "..."}`.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TaskDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(draft) = body.map_err(bad_json)?;
    let draft = prepare(draft, state.today()).map_err(task_error)?;
    let id = state.tasks.add(&draft).map_err(task_error)?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/task?id=
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Task>> {
    let id = require_id(query)?;
    let task = state.tasks.get(&id).map_err(task_error)?;
    Ok(Json(task))
}

/// PUT /api/task — replace every field of an existing task.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Task>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(task) = body.map_err(bad_json)?;
    if task.id.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "task id is required"));
    }
    let draft = prepare(task.draft(), state.today()).map_err(task_error)?;
    state
        .tasks
        .update(&Task::from_draft(task.id.trim(), draft))
        .map_err(task_error)?;
    Ok(Json(json!({})))
}

/// DELETE /api/task?id=
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let id = require_id(query)?;
    state.tasks.remove(&id).map_err(task_error)?;
    Ok(Json(json!({})))
}

/// POST /api/task/done?id= — delete a one-off task or move a recurring one
/// to its next occurrence.
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let id = require_id(query)?;
    match state.tasks.complete(&id).map_err(task_error)? {
        Some(next) => info!(task_id = %id, next = %next, "recurring task done"),
        None => info!(task_id = %id, "task done"),
    }
    Ok(Json(json!({})))
}

/// GET /api/tasks?search=&limit=
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query.map_err(bad_query)?;
    let limit = query.limit.unwrap_or(state.config.tasks.limit);
    let tasks = state
        .tasks
        .list(query.search.as_deref(), limit)
        .map_err(task_error)?;
    Ok(Json(json!({ "tasks": tasks })))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn require_id(query: Result<Query<IdQuery>, QueryRejection>) -> ApiResult<String> {
    let Query(query) = query.map_err(bad_query)?;
    query
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "task id is required"))
}

fn bad_json(rejection: JsonRejection) -> (StatusCode, Json<super::ApiError>) {
    warn!(error = %rejection.body_text(), "rejected task body");
    api_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn bad_query(rejection: QueryRejection) -> (StatusCode, Json<super::ApiError>) {
    warn!(error = %rejection.body_text(), "rejected query string");
    api_error(StatusCode::BAD_REQUEST, rejection.body_text())
}
