//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the HTTP handlers and the store.

pub mod todo;
pub mod user;

pub use todo::TodoService;
pub use user::UserService;
