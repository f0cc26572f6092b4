//! Todo repository for database operations
//!
//! Every statement that reads or changes an existing row filters on both
//! `id` and `username`, so a row owned by someone else behaves exactly like
//! a missing one.

use crate::db::PgStore;
use anyhow::Result;
use async_trait::async_trait;
use todo_shared::Todo;
use uuid::Uuid;

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub username: String,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Todo {
            id: record.id,
            title: record.title,
            done: record.done,
            username: record.username,
        }
    }
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub username: String,
    pub title: String,
    pub done: bool,
}

/// Todo persistence, scoped by owner
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos owned by `username`, oldest first
    async fn list_for_owner(&self, username: &str) -> Result<Vec<TodoRecord>>;

    /// Insert a todo; the store assigns the id
    async fn create(&self, input: CreateTodo) -> Result<TodoRecord>;

    /// Replace the title. `None` when no row matched id and owner.
    async fn update_title(&self, id: Uuid, username: &str, title: &str) -> Result<Option<TodoRecord>>;

    /// Flip `done`. `None` when no row matched id and owner.
    async fn toggle_done(&self, id: Uuid, username: &str) -> Result<Option<TodoRecord>>;

    /// Delete. `false` when no row matched id and owner.
    async fn delete(&self, id: Uuid, username: &str) -> Result<bool>;
}

#[async_trait]
impl TodoRepository for PgStore {
    async fn list_for_owner(&self, username: &str) -> Result<Vec<TodoRecord>> {
        let records = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, title, done, username
            FROM todos
            WHERE username = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(username)
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }

    async fn create(&self, input: CreateTodo) -> Result<TodoRecord> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            INSERT INTO todos (title, done, username)
            VALUES ($1, $2, $3)
            RETURNING id, title, done, username
            "#,
        )
        .bind(&input.title)
        .bind(input.done)
        .bind(&input.username)
        .fetch_one(self.pool())
        .await?;

        Ok(record)
    }

    async fn update_title(&self, id: Uuid, username: &str, title: &str) -> Result<Option<TodoRecord>> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            UPDATE todos SET title = $1
            WHERE id = $2 AND username = $3
            RETURNING id, title, done, username
            "#,
        )
        .bind(title)
        .bind(id)
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(record)
    }

    async fn toggle_done(&self, id: Uuid, username: &str) -> Result<Option<TodoRecord>> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            UPDATE todos SET done = NOT done
            WHERE id = $1 AND username = $2
            RETURNING id, title, done, username
            "#,
        )
        .bind(id)
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: Uuid, username: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND username = $2
            "#,
        )
        .bind(id)
        .bind(username)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
