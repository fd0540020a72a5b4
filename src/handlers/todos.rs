//! Todo HTTP handlers
//!
//! Every route operates on the authenticated user's own todos; ownership is
//! enforced in the service queries, not here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::CurrentUser;
use crate::error::ApiError;
use crate::models::{TodoRequest, TodoResponse};
use crate::state::AppState;

/// GET /todos/ - List the authenticated user's todos
pub async fn list_todos(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.todo_service.list_for_owner(user.user_id).await?;

    Ok(Json(todos.into_iter().map(Into::into).collect()))
}

/// GET /todos/todo/:todo_id - Fetch one of the authenticated user's todos
pub async fn get_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(todo_id): Path<Uuid>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state
        .todo_service
        .get_for_owner(todo_id, user.user_id)
        .await?;

    Ok(Json(todo.into()))
}

/// POST /todos/todo - Create a todo owned by the authenticated user
pub async fn create_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<TodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    req.validate()?;

    let todo = state
        .todo_service
        .create_for_owner(user.user_id, req)
        .await?;

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// PUT /todos/todo/:todo_id - Replace a todo's fields
pub async fn update_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(todo_id): Path<Uuid>,
    Json(req): Json<TodoRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;

    state
        .todo_service
        .update_for_owner(todo_id, user.user_id, req)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /todos/todo/:todo_id - Delete one of the authenticated user's todos
pub async fn delete_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(todo_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .todo_service
        .delete_for_owner(todo_id, user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
