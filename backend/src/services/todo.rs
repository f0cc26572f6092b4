//! Todo service
//!
//! Each operation is one repository call scoped to the authenticated
//! username. Ids that are not UUIDs cannot match any row and are reported
//! as not found, the same as a foreign or deleted id.

use crate::error::ApiError;
use crate::repositories::{CreateTodo, Store, TodoRepository};
use todo_shared::Todo;
use tracing::info;
use uuid::Uuid;

/// Todo service for per-owner CRUD
pub struct TodoService;

impl TodoService {
    /// All todos of `username`
    pub async fn list(store: &dyn Store, username: &str) -> Result<Vec<Todo>, ApiError> {
        let records = store
            .list_for_owner(username)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Todo::from).collect())
    }

    /// Create a todo owned by `username`
    pub async fn add(store: &dyn Store, username: &str, title: String, done: bool) -> Result<Todo, ApiError> {
        let record = store
            .create(CreateTodo {
                username: username.to_string(),
                title,
                done,
            })
            .await
            .map_err(ApiError::Internal)?;

        info!(username = %username, todo_id = %record.id, "Todo created");
        Ok(record.into())
    }

    /// Replace the title of one of `username`'s todos
    pub async fn update_title(
        store: &dyn Store,
        username: &str,
        id: &str,
        title: Option<String>,
    ) -> Result<Todo, ApiError> {
        let title =
            title.ok_or_else(|| ApiError::BadRequest("No title provided for update".to_string()))?;
        let id = parse_todo_id(id)?;

        let record = store
            .update_title(id, username, &title)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| todo_not_found(id))?;

        info!(username = %username, todo_id = %id, "Todo updated");
        Ok(record.into())
    }

    /// Flip `done` on one of `username`'s todos
    pub async fn toggle(store: &dyn Store, username: &str, id: &str) -> Result<Todo, ApiError> {
        let id = parse_todo_id(id)?;

        let record = store
            .toggle_done(id, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| todo_not_found(id))?;

        info!(username = %username, todo_id = %id, done = record.done, "Todo toggled");
        Ok(record.into())
    }

    /// Delete one of `username`'s todos
    pub async fn delete(store: &dyn Store, username: &str, id: &str) -> Result<(), ApiError> {
        let id = parse_todo_id(id)?;

        let deleted = store
            .delete(id, username)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(todo_not_found(id));
        }

        info!(username = %username, todo_id = %id, "Todo deleted");
        Ok(())
    }
}

fn parse_todo_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(format!("Todo {} not found", id)))
}

fn todo_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Todo {} not found", id))
}
