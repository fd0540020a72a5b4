//! JWT token generation and validation
//!
//! Access tokens are HS256-signed and carry the username, user id and role.
//! Validation is purely computational: signature, algorithm and expiry are
//! checked without touching the database.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::UserRole;

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// User id
    pub id: Uuid,
    /// Role captured at issuance
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issue a signed access token expiring `ttl` from now
pub fn issue_token(
    username: &str,
    user_id: Uuid,
    role: UserRole,
    ttl: Duration,
    secret: &str,
) -> Result<String, JwtError> {
    let expires_at = Utc::now() + ttl;

    let claims = Claims {
        sub: username.to_string(),
        id: user_id,
        role,
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Decode and validate an access token, returning its claims
///
/// Rejects tokens that are expired, signed with the wrong key or algorithm,
/// or missing any of the expected claims. No clock leeway is granted, so a
/// token is invalid from the instant its expiry passes.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken(e.to_string()),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key";

    fn issue(ttl_seconds: i64) -> String {
        issue_token(
            "alice",
            Uuid::new_v4(),
            UserRole::User,
            Duration::seconds(ttl_seconds),
            SECRET,
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(
            "alice",
            user_id,
            UserRole::Admin,
            Duration::seconds(60),
            SECRET,
        )
        .unwrap();

        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.id, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(60);
        let result = decode_token(&token, "a-different-secret");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue(-10);
        let result = decode_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = decode_token("not.a.token", SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issue(60);
        let mut parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        // Swap in a forged payload while keeping the original signature
        let forged = issue_token(
            "mallory",
            Uuid::new_v4(),
            UserRole::Admin,
            Duration::seconds(60),
            SECRET,
        )
        .unwrap();
        let forged_payload: Vec<&str> = forged.split('.').collect();
        parts[1] = forged_payload[1];

        let result = decode_token(&parts.join("."), SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            id: Uuid::new_v4(),
            role: UserRole::User,
            exp: (Utc::now() + Duration::seconds(60)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = decode_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_missing_claims_rejected() {
        #[derive(Serialize)]
        struct BareClaims {
            sub: String,
            exp: i64,
        }
        let claims = BareClaims {
            sub: "alice".to_string(),
            exp: (Utc::now() + Duration::seconds(60)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = decode_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_missing_expiry_rejected() {
        #[derive(Serialize)]
        struct NoExpClaims {
            sub: String,
            id: Uuid,
            role: UserRole,
        }
        let claims = NoExpClaims {
            sub: "alice".to_string(),
            id: Uuid::new_v4(),
            role: UserRole::User,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        #[derive(Serialize)]
        struct RawClaims {
            sub: String,
            id: Uuid,
            role: String,
            exp: i64,
        }
        let claims = RawClaims {
            sub: "alice".to_string(),
            id: Uuid::new_v4(),
            role: "superuser".to_string(),
            exp: (Utc::now() + Duration::seconds(60)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = decode_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
