//! User repository for database operations

use crate::db::PgStore;
use anyhow::Result;
use async_trait::async_trait;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
}

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user unless the username is taken
    ///
    /// Returns `true` when a row was inserted, `false` when the username
    /// already existed (the existing row is left untouched).
    async fn create_if_absent(&self, username: &str, password_hash: &str) -> Result<bool>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_if_absent(&self, username: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }
}
