//! User account routes

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::users;
use crate::state::AppState;

/// Create user account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/get_user", get(users::get_user))
        .route("/users/change_password", put(users::change_password))
        .route(
            "/users/phone_number/:phone_number",
            put(users::update_phone_number),
        )
}
