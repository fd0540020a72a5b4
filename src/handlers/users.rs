//! User account HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::CurrentUser;
use crate::error::ApiError;
use crate::models::{ChangePasswordRequest, UserResponse};
use crate::state::AppState;

/// GET /users/get_user - Current user's profile without the password hash
pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth_service.get_user_by_id(user.user_id).await?;

    Ok(Json(user.into()))
}

/// PUT /users/change_password - Rotate the password after verifying the old one
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;

    state
        .auth_service
        .change_password(user.user_id, &req.password, &req.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /users/phone_number/:phone_number - Update the phone number on file
pub async fn update_phone_number(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(phone_number): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .update_phone_number(user.user_id, &phone_number)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
