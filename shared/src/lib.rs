//! Todo Service Shared Library
//!
//! Wire types and domain models shared by the backend and any Rust client
//! of the todo API.

pub mod models;
pub mod types;

// Re-export commonly used items
pub use models::Todo;
pub use types::*;
