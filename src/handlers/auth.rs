//! Authentication HTTP handlers
//!
//! Registration and the token endpoint.

use axum::{extract::State, http::StatusCode, Form, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{CreateUserRequest, LoginRequest, TokenResponse};
use crate::state::AppState;

/// POST /auth/ - Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;

    state.auth_service.register_user(req).await?;

    Ok(StatusCode::CREATED)
}

/// POST /auth/token - Exchange form credentials for an access token
pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(tokens))
}
