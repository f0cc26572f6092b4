//! In-memory store
//!
//! Mirrors the PostgreSQL semantics the services rely on: unique usernames,
//! todos must reference an existing user, id and owner filtering on every
//! todo statement. Used by the test suite and for running the router without
//! a database.

use super::{CreateTodo, Store, TodoRecord, TodoRepository, UserRecord, UserRepository};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<String, String>,
    /// Insertion order doubles as creation order
    todos: Vec<TodoRecord>,
}

/// Store backed by process memory
pub struct MemoryStore {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the database going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of registered users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    fn check_available(&self) -> Result<()> {
        if !self.available.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_if_absent(&self, username: &str, password_hash: &str) -> Result<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(username) {
            return Ok(false);
        }
        tables
            .users
            .insert(username.to_string(), password_hash.to_string());
        Ok(true)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.get(username).map(|hash| UserRecord {
            username: username.to_string(),
            password_hash: hash.clone(),
        }))
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn list_for_owner(&self, username: &str) -> Result<Vec<TodoRecord>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .iter()
            .filter(|t| t.username == username)
            .cloned()
            .collect())
    }

    async fn create(&self, input: CreateTodo) -> Result<TodoRecord> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.username) {
            bail!("todo owner '{}' does not exist", input.username);
        }
        let record = TodoRecord {
            id: Uuid::new_v4(),
            title: input.title,
            done: input.done,
            username: input.username,
        };
        tables.todos.push(record.clone());
        Ok(record)
    }

    async fn update_title(&self, id: Uuid, username: &str, title: &str) -> Result<Option<TodoRecord>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.username == username)
            .map(|t| {
                t.title = title.to_string();
                t.clone()
            }))
    }

    async fn toggle_done(&self, id: Uuid, username: &str) -> Result<Option<TodoRecord>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.username == username)
            .map(|t| {
                t.done = !t.done;
                t.clone()
            }))
    }

    async fn delete(&self, id: Uuid, username: &str) -> Result<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| !(t.id == id && t.username == username));
        Ok(tables.todos.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
