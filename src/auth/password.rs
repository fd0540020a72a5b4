//! Password hashing and verification
//!
//! Wraps bcrypt with a fixed work factor and a timing-equalized path for
//! lookups that miss.

use thiserror::Error;

/// Errors that can occur during password hashing or verification
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    InvalidHashFormat(String),
}

/// Input burned against the dummy hash when no user record exists
const DUMMY_PASSWORD: &str = "taskvault-timing-equalizer";

/// bcrypt hasher with a configured cost factor
///
/// Holds a pre-computed dummy hash at the same cost so that verification
/// against a missing record takes as long as verification against a real one.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (valid range 4..=31)
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Self { cost, dummy_hash })
    }

    /// Hash a plaintext password for storage
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))
    }

    /// Burn one verification against the dummy hash
    ///
    /// Called when the user lookup misses, so "unknown user" and "wrong
    /// password" cost the same wall-clock time.
    pub fn burn(&self, password: &str) {
        let _ = bcrypt::verify(password, &self.dummy_hash);
    }
}
