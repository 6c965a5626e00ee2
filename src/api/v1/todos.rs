//! Todo CRUD handlers.
//!
//! Each handler extracts path and body parameters, validates them, calls
//! the repository and maps the outcome to a response. Failures go through
//! [`ApiError`], which owns the status-code mapping.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

use crate::api::codec::respond;
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{Database, Todo, TodoPayload, TodoRepository};

// =============================================================================
// Helpers
// =============================================================================

/// Parse a `{id}` path segment. Ids are positive integers.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::InvalidArgument("Invalid ID format".to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// List all todos
#[utoipa::path(
    get,
    path = "/",
    tag = "todos",
    responses(
        (status = 200, description = "All todos, ordered by id", body = [Todo]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Response, ApiError> {
    let todos = state.db().todos().list().await?;
    respond(StatusCode::OK, todos.as_slice())
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/todo/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo found", body = Todo),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.db().todos().get(id).await?;
    respond(StatusCode::OK, &todo)
}

/// Create a new todo
///
/// Responds with an empty body and the new resource in `Location`.
#[utoipa::path(
    post,
    path = "/todo",
    tag = "todos",
    request_body = TodoPayload,
    responses(
        (status = 201, description = "Todo created"),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let todo = TodoPayload::decode(&body)?.into_todo()?;

    let id = state.db().todos().create(&todo).await?;
    info!(id, "todo created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/todo/{}", id))],
    )
        .into_response())
}

/// Update a todo
///
/// Fields missing from the body keep their stored value; `expired_at: null`
/// clears the expiry. The merged todo must pass validation.
#[utoipa::path(
    put,
    path = "/todo/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo ID")),
    request_body = TodoPayload,
    responses(
        (status = 204, description = "Todo updated"),
        (status = 400, description = "Malformed ID or body, or invalid result", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let payload = TodoPayload::decode(&body)?;

    let current = state.db().todos().get(id).await?;
    let todo = payload.merge_into(&current)?;

    state.db().todos().update(&todo).await?;
    info!(id, "todo updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todo/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.db().todos().delete(id).await?;
    info!(id, "todo deleted");

    Ok(StatusCode::NO_CONTENT)
}
