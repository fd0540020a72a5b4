//! Authentication models for TaskVault

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::UserRole;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request to register a new user
///
/// The configured minimum password length is enforced by the auth service;
/// the derive only rejects structurally empty input.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub role: UserRole,
}

/// Form body for the token endpoint (OAuth2 password flow shape)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Request to change the current user's password
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub password: String,

    #[validate(length(min = 1))]
    pub new_password: String,
}

/// User response (sanitized for API)
#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_rejects_bad_email() {
        let req = CreateUserRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            password: "secret123".to_string(),
            role: UserRole::User,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_request_rejects_short_username() {
        let req = CreateUserRequest {
            username: "al".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            password: "secret123".to_string(),
            role: UserRole::User,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_request_accepts_valid_input() {
        let req = CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            password: "secret123".to_string(),
            role: UserRole::User,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_role_deserializes_from_lowercase() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{
                "username": "alice",
                "email": "alice@example.com",
                "first_name": "Alice",
                "last_name": "Doe",
                "password": "secret123",
                "role": "admin"
            }"#,
        )
        .unwrap();
        assert_eq!(req.role, UserRole::Admin);
    }
}
