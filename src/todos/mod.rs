//! Todo module for TaskVault
//!
//! Per-owner todo CRUD plus the admin-wide view used by the admin routes.

mod service;

pub use service::{TodoError, TodoService};
