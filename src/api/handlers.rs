//! Todo request handlers.
//!
//! Each handler validates its input, issues one statement against the store
//! (full update issues two) and shapes the result into an [`Envelope`].

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Serialize;
use tracing::debug;

use super::envelope::Envelope;
use super::request::{TodoFields, is_truthy, parse_body, parse_id};
use super::server::AppState;
use crate::error::{
    ApiError, ApiResult, CREATE_BODY_INVALID, SIGNATURE_NOT_FOUND, TASK_NOT_FOUND, TODO_NOT_FOUND,
};
use crate::types::Todo;

#[derive(Debug, Serialize)]
pub struct Created {
    pub signature: Vec<Todo>,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub todos: Todo,
}

#[derive(Debug, Serialize)]
pub struct Toggled {
    pub task: Todo,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub version: &'static str,
}

type Reply<T> = ApiResult<(StatusCode, Json<Envelope<T>>)>;

fn ok<T>(data: T) -> Reply<T> {
    Ok((StatusCode::OK, Json(Envelope::success(data))))
}

/// `GET /todos` and `GET /`.
pub async fn list_todos(State(state): State<AppState>) -> Reply<Vec<Todo>> {
    let result = state.db().list_todos()?;
    debug!(row_count = result.row_count, "Listed todos");
    ok(result.rows)
}

/// `POST /todos`.
pub async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Reply<Created> {
    let body = parse_body(&headers, &body)?;
    let fields = TodoFields::from_body(&body)
        .ok_or_else(|| ApiError::invalid_body("name", CREATE_BODY_INVALID))?;

    let completed = body.get("completed").is_some_and(is_truthy).then_some(true);
    let result = state
        .db()
        .insert_todo(fields.tasks, fields.due_date, completed)?;
    debug!(row_count = result.row_count, "Created todo");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(Created {
            signature: result.rows,
        })),
    ))
}

/// `GET /todos/{id}`.
pub async fn get_todo(State(state): State<AppState>, Path(id): Path<String>) -> Reply<Todo> {
    let id = parse_id(&id)?;
    let result = state.db().find_todo(id)?;
    debug!(id, row_count = result.row_count, "Looked up todo");

    let todo = result
        .single()
        .ok_or_else(|| ApiError::not_found(SIGNATURE_NOT_FOUND))?;
    ok(todo)
}

/// `DELETE /todos/{id}`.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<Envelope<()>>)> {
    let id = parse_id(&id)?;
    let result = state.db().delete_todo(id)?;
    debug!(id, row_count = result.row_count, "Deleted todo");

    if result.row_count != 1 {
        return Err(ApiError::not_found(TODO_NOT_FOUND));
    }
    Ok((StatusCode::OK, Json(Envelope::ack())))
}

/// `PUT /todos/{id}`.
///
/// Invalid bodies answer with the same 404 as a missing row. The payload is
/// the row as read by the existence check, before the update is applied.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Reply<Updated> {
    let id = parse_id(&id)?;
    let body = parse_body(&headers, &body)?;
    let fields =
        TodoFields::from_body(&body).ok_or_else(|| ApiError::not_found(TODO_NOT_FOUND))?;

    let existing = state.db().find_todo(id)?;
    debug!(id, row_count = existing.row_count, "Looked up todo for update");
    let snapshot = existing
        .single()
        .ok_or_else(|| ApiError::not_found(TODO_NOT_FOUND))?;

    let result = state.db().update_todo(id, fields.tasks, fields.due_date)?;
    debug!(id, row_count = result.row_count, "Updated todo");

    ok(Updated { todos: snapshot })
}

/// `PUT /todos/{id}/complete`.
pub async fn toggle_todo(State(state): State<AppState>, Path(id): Path<String>) -> Reply<Toggled> {
    let id = parse_id(&id)?;
    let result = state.db().toggle_todo(id)?;
    debug!(id, row_count = result.row_count, "Toggled todo");

    let task = result
        .single()
        .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))?;
    ok(Toggled { task })
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Reply<Health> {
    state.db().ping()?;
    ok(Health {
        version: env!("CARGO_PKG_VERSION"),
    })
}
