//! Todo routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::todos;
use crate::state::AppState;

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos/", get(todos::list_todos))
        .route("/todos/todo", post(todos::create_todo))
        .route(
            "/todos/todo/:todo_id",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
}
