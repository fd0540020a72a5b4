//! Admin HTTP handlers
//!
//! Role-gated by the `AdminUser` extractor; any non-admin token is rejected
//! with 401 before these run.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::AdminUser;
use crate::error::ApiError;
use crate::models::TodoResponse;
use crate::state::AppState;

/// GET /admin/todo - List every todo across all owners
pub async fn list_all_todos(
    State(state): State<AppState>,
    AdminUser(_user): AdminUser,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.todo_service.list_all().await?;

    Ok(Json(todos.into_iter().map(Into::into).collect()))
}

/// DELETE /admin/todo/:todo_id - Delete any todo regardless of owner
pub async fn delete_any_todo(
    State(state): State<AppState>,
    AdminUser(_user): AdminUser,
    Path(todo_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.todo_service.delete_any(todo_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
