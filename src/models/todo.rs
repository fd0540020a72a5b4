//! Todo DTOs for TaskVault

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating or replacing a todo item
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    #[validate(length(min = 3, max = 255))]
    pub title: String,

    #[validate(length(min = 3, max = 1000))]
    pub description: String,

    #[validate(range(min = 1, max = 5))]
    pub priority: i32,

    #[serde(default)]
    pub complete: bool,
}

/// Todo response
#[derive(Debug, Serialize, Clone)]
pub struct TodoResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
