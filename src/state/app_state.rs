//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::AuthService;
use crate::todos::TodoService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub todo_service: Arc<TodoService>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, todo_service: Arc<TodoService>) -> Self {
        Self {
            auth_service,
            todo_service,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<TodoService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.todo_service.clone()
    }
}
