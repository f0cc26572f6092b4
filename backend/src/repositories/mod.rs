//! Database repositories
//!
//! Provides the data access layer. Services talk to a `Store` trait object so
//! the PostgreSQL store can be swapped for the in-memory one.

pub mod memory;
pub mod todo;
pub mod user;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use todo::{CreateTodo, TodoRecord, TodoRepository};
pub use user::{UserRecord, UserRepository};

/// Everything the request handlers need from persistence
#[async_trait]
pub trait Store: UserRepository + TodoRepository {
    /// Round-trip to the backing store
    async fn ping(&self) -> Result<()>;
}
