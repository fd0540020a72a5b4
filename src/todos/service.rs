//! Todo service
//!
//! Database-backed CRUD over todo items. Per-owner operations scope every
//! query by `owner_id`, so a todo owned by someone else is indistinguishable
//! from one that does not exist.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Todo, TodoRequest};

/// Todo service errors
#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Todo not found")]
    TodoNotFound,
}

impl From<sqlx::Error> for TodoError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => TodoError::TodoNotFound,
            other => TodoError::DatabaseError(other.to_string()),
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::TodoNotFound => ApiError::NotFound("Todo not found".to_string()),
            TodoError::DatabaseError(msg) => ApiError::Database(msg),
        }
    }
}

/// Todo service backed by Postgres
pub struct TodoService {
    db_pool: PgPool,
}

impl TodoService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// List all todos belonging to an owner
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Todo>, TodoError> {
        let todos: Vec<Todo> = sqlx::query_as(
            r#"
            SELECT id, owner_id, title, description, priority, complete, created_at, updated_at
            FROM todos
            WHERE owner_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(todos)
    }

    /// Fetch a single todo owned by `owner_id`
    pub async fn get_for_owner(&self, todo_id: Uuid, owner_id: Uuid) -> Result<Todo, TodoError> {
        let todo: Option<Todo> = sqlx::query_as(
            r#"
            SELECT id, owner_id, title, description, priority, complete, created_at, updated_at
            FROM todos
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(todo_id)
        .bind(owner_id)
        .fetch_optional(&self.db_pool)
        .await?;

        todo.ok_or(TodoError::TodoNotFound)
    }

    /// Create a todo for an owner
    pub async fn create_for_owner(
        &self,
        owner_id: Uuid,
        request: TodoRequest,
    ) -> Result<Todo, TodoError> {
        let todo: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (owner_id, title, description, priority, complete)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, title, description, priority, complete, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.priority)
        .bind(request.complete)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(todo)
    }

    /// Update a todo owned by `owner_id`
    pub async fn update_for_owner(
        &self,
        todo_id: Uuid,
        owner_id: Uuid,
        request: TodoRequest,
    ) -> Result<Todo, TodoError> {
        let todo: Option<Todo> = sqlx::query_as(
            r#"
            UPDATE todos
            SET title = $1, description = $2, priority = $3, complete = $4, updated_at = NOW()
            WHERE id = $5 AND owner_id = $6
            RETURNING id, owner_id, title, description, priority, complete, created_at, updated_at
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.priority)
        .bind(request.complete)
        .bind(todo_id)
        .bind(owner_id)
        .fetch_optional(&self.db_pool)
        .await?;

        todo.ok_or(TodoError::TodoNotFound)
    }

    /// Delete a todo owned by `owner_id`
    pub async fn delete_for_owner(&self, todo_id: Uuid, owner_id: Uuid) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(todo_id)
            .bind(owner_id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::TodoNotFound);
        }

        Ok(())
    }

    /// List every todo regardless of owner (admin view)
    pub async fn list_all(&self) -> Result<Vec<Todo>, TodoError> {
        let todos: Vec<Todo> = sqlx::query_as(
            r#"
            SELECT id, owner_id, title, description, priority, complete, created_at, updated_at
            FROM todos
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(todos)
    }

    /// Delete any todo regardless of owner (admin operation)
    pub async fn delete_any(&self, todo_id: Uuid) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::TodoNotFound);
        }

        Ok(())
    }
}
