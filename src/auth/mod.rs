//! Authentication module for TaskVault
//!
//! Provides username/password authentication with bearer tokens.
//! - bcrypt password hashing with timing-equalized failure paths
//! - JWT access token issuance and stateless validation
//! - Password changes and profile updates

mod jwt;
mod password;
mod service;

pub use jwt::{decode_token, issue_token, Claims, JwtError};
pub use password::{PasswordError, PasswordHasher};
pub use service::{AuthError, AuthService};
