//! Data models for the todo service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo item as exposed over the API
///
/// `username` identifies the owner. It always comes from the store row,
/// which in turn was written from the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub username: String,
}
