//! API handlers for TaskVault backend

pub mod admin;
pub mod auth;
pub mod todos;
pub mod users;

pub use admin::*;
pub use auth::*;
pub use todos::*;
pub use users::*;

// Re-export extractors from middleware for handler use
pub use crate::middleware::auth::{AdminUser, CurrentUser};
