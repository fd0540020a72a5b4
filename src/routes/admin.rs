//! Admin routes

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::admin;
use crate::state::AppState;

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/todo", get(admin::list_all_todos))
        .route("/admin/todo/:todo_id", delete(admin::delete_any_todo))
}
