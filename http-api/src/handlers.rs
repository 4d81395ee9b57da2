//! Request handlers for the todo REST endpoints.
//!
//! Bodies are extracted as JSON maps rather than typed structs so the
//! payload layer can distinguish absent keys from explicit nulls and
//! report disallowed fields by name.

use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use todo_core::{
    payload::{parse_completed_param, window_cutoff},
    NewTodo, Todo, TodoError, TodoFilter, TodoRepository, UpdateTodo,
};

/// Shared state for handlers
pub struct ApiState<R> {
    pub repository: Arc<R>,
}

/// GET /api/v1/health - fixed liveness payload, no store access
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Query parameters accepted by the list endpoint.
///
/// Both arrive as raw strings: `completed` has string-compare semantics
/// and `window` parse failures must surface as a 400 rather than a
/// rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub completed: Option<String>,
    pub window: Option<String>,
}

/// GET /api/v1/todos
pub async fn list_todos<R: TodoRepository>(
    State(state): State<Arc<ApiState<R>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let mut filter = TodoFilter::default();

    if let Some(completed) = params.completed.as_deref() {
        filter.completed = Some(parse_completed_param(completed));
    }

    if let Some(window) = params.window.as_deref() {
        let days: i64 = window
            .parse()
            .map_err(|_| TodoError::Validation("Window must be an integer".to_string()))?;
        let cutoff = window_cutoff(Local::now(), days)
            .ok_or_else(|| TodoError::Validation("Window is out of range".to_string()))?;
        filter.due_within = Some(cutoff);
    }

    let todos = state.repository.list(filter).await?;
    Ok(Json(todos))
}

/// GET /api/v1/todos/{id}
pub async fn get_todo<R: TodoRepository>(
    State(state): State<Arc<ApiState<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    match state.repository.get_by_id(id).await? {
        Some(todo) => Ok(Json(todo)),
        None => Err(TodoError::not_found_id(id).into()),
    }
}

/// POST /api/v1/todos
pub async fn create_todo<R: TodoRepository>(
    State(state): State<Arc<ApiState<R>>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let draft = NewTodo::from_payload(&body)?;
    let todo = state.repository.create(draft).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/v1/todos/{id}
pub async fn update_todo<R: TodoRepository>(
    State(state): State<Arc<ApiState<R>>>,
    Path(id): Path<i64>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Todo>, ApiError> {
    // Body validation runs before the existence check, so a bad field on a
    // missing todo still reports 400.
    let changes = UpdateTodo::from_payload(&body)?;
    let todo = state.repository.update(id, changes).await?;
    Ok(Json(todo))
}

/// DELETE /api/v1/todos/{id}
///
/// Deleting a nonexistent todo is an idempotent no-op returning `{}`.
pub async fn delete_todo<R: TodoRepository>(
    State(state): State<Arc<ApiState<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.repository.delete(id).await? {
        Some(todo) => Ok(Json(json!(todo))),
        None => Ok(Json(json!({}))),
    }
}
