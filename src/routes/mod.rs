//! Route definitions for TaskVault API

mod admin;
mod auth;
mod todos;
mod users;

pub use admin::admin_routes;
pub use auth::auth_routes;
pub use todos::todo_routes;
pub use users::user_routes;
