//! Authentication service
//!
//! Core business logic for username/password authentication, token issuance
//! and account maintenance.

use chrono::Duration;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{CreateUserRequest, TokenResponse, User, UserRole};

use super::jwt::{self, Claims, JwtError};
use super::password::{PasswordError, PasswordHasher};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username or email already registered")]
    AlreadyRegistered,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Phone number must be at most {0} characters")]
    PhoneNumberTooLong(usize),

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Password hashing error: {0}")]
    HashingError(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AuthError::UserNotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::AlreadyRegistered,
            other => AuthError::DatabaseError(other.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::TokenError(e.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::HashingError(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::AlreadyRegistered => {
                ApiError::Conflict("Username or email already registered".to_string())
            }
            AuthError::PasswordTooShort(min) => {
                ApiError::Validation(format!("Password must be at least {min} characters"))
            }
            AuthError::PhoneNumberTooLong(max) => {
                ApiError::Validation(format!("Phone number must be at most {max} characters"))
            }
            AuthError::DatabaseError(msg) => ApiError::Database(msg),
            AuthError::TokenError(msg) | AuthError::HashingError(msg) => ApiError::Internal(msg),
        }
    }
}

/// Cap a requested token lifetime at the configured ceiling
fn clamp_ttl(ttl_seconds: i64, max_seconds: i64) -> i64 {
    ttl_seconds.min(max_seconds)
}

/// Column width of users.phone_number
const MAX_PHONE_NUMBER_LENGTH: usize = 20;

/// Authentication service backed by Postgres
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    access_token_ttl_seconds: i64,
    max_token_ttl_seconds: i64,
    min_password_length: usize,
    password_hasher: PasswordHasher,
}

impl AuthService {
    /// Create a new auth service from application configuration
    pub fn new(db_pool: PgPool, config: &Config) -> Result<Self, AuthError> {
        let password_hasher = PasswordHasher::new(config.bcrypt_cost)?;

        Ok(Self {
            db_pool,
            jwt_secret: config.jwt_secret.clone(),
            access_token_ttl_seconds: config.access_token_ttl_seconds,
            max_token_ttl_seconds: config.max_token_ttl_seconds,
            min_password_length: config.min_password_length,
            password_hasher,
        })
    }

    /// Register a new user with a hashed password
    pub async fn register_user(&self, request: CreateUserRequest) -> Result<User, AuthError> {
        self.check_password_policy(&request.password)?;

        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE username = $1 OR email = $2")
                .bind(&request.username)
                .bind(&request.email)
                .fetch_optional(&self.db_pool)
                .await?;

        if existing.is_some() {
            return Err(AuthError::AlreadyRegistered);
        }

        let hashed_password = self.password_hasher.hash(&request.password)?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, first_name, last_name, hashed_password, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, first_name, last_name, hashed_password,
                      role, is_active, phone_number, created_at, updated_at
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&hashed_password)
        .bind(request.role)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(user)
    }

    /// Check a username/password pair against stored credentials
    ///
    /// Returns `Ok(None)` when the user is unknown, inactive or the password
    /// does not match. A missing user still burns one bcrypt verification so
    /// the two failure modes are indistinguishable by timing.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, username, email, first_name, last_name, hashed_password,
                   role, is_active, phone_number, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await?;

        let user = match user {
            Some(user) => user,
            None => {
                self.password_hasher.burn(password);
                return Ok(None);
            }
        };

        if !self.password_hasher.verify(password, &user.hashed_password)? {
            return Ok(None);
        }

        if !user.is_active {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Authenticate and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AuthError> {
        let user = self
            .authenticate(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let access_token =
            self.issue_token(&user.username, user.id, user.role, self.access_token_ttl_seconds)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Issue a signed token for an authenticated principal
    ///
    /// The requested lifetime is clamped to the configured maximum.
    pub fn issue_token(
        &self,
        username: &str,
        user_id: Uuid,
        role: UserRole,
        ttl_seconds: i64,
    ) -> Result<String, AuthError> {
        let ttl = clamp_ttl(ttl_seconds, self.max_token_ttl_seconds);
        let token =
            jwt::issue_token(username, user_id, role, Duration::seconds(ttl), &self.jwt_secret)?;
        Ok(token)
    }

    /// Validate an access token and return its claims
    ///
    /// Purely computational; does not consult the database.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        jwt::decode_token(token, &self.jwt_secret)
    }

    /// Fetch a user by id
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, username, email, first_name, last_name, hashed_password,
                   role, is_active, phone_number, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?;

        user.ok_or(AuthError::UserNotFound)
    }

    /// Change a user's password after verifying the current one
    ///
    /// The stored hash is untouched unless the old password verifies and the
    /// new one satisfies the password policy.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self.get_user_by_id(user_id).await?;

        if !self
            .password_hasher
            .verify(old_password, &user.hashed_password)?
        {
            return Err(AuthError::InvalidCredentials);
        }

        self.check_password_policy(new_password)?;

        let new_hash = self.password_hasher.hash(new_password)?;

        sqlx::query("UPDATE users SET hashed_password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    /// Update a user's phone number
    ///
    /// Values longer than the column width are rejected before any statement
    /// runs.
    pub async fn update_phone_number(
        &self,
        user_id: Uuid,
        phone_number: &str,
    ) -> Result<(), AuthError> {
        if phone_number.chars().count() > MAX_PHONE_NUMBER_LENGTH {
            return Err(AuthError::PhoneNumberTooLong(MAX_PHONE_NUMBER_LENGTH));
        }

        let result =
            sqlx::query("UPDATE users SET phone_number = $1, updated_at = NOW() WHERE id = $2")
                .bind(phone_number)
                .bind(user_id)
                .execute(&self.db_pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    fn check_password_policy(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::PasswordTooShort(self.min_password_length));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_ttl_caps_at_maximum() {
        assert_eq!(clamp_ttl(1200, 86400), 1200);
        assert_eq!(clamp_ttl(604800, 86400), 86400);
        assert_eq!(clamp_ttl(86400, 86400), 86400);
    }

    #[test]
    fn test_auth_error_maps_to_api_error() {
        let api: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(api.error_code(), "UNAUTHORIZED");

        let api: ApiError = AuthError::AlreadyRegistered.into();
        assert_eq!(api.error_code(), "CONFLICT");

        let api: ApiError = AuthError::PasswordTooShort(8).into();
        assert_eq!(api.error_code(), "VALIDATION_ERROR");

        let api: ApiError = AuthError::PhoneNumberTooLong(20).into();
        assert_eq!(api.error_code(), "VALIDATION_ERROR");

        let api: ApiError = AuthError::UserNotFound.into();
        assert_eq!(api.error_code(), "NOT_FOUND");
    }
}
