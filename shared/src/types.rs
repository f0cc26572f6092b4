//! API request and response types
//!
//! Request bodies carry their field-level rules as `validator` attributes so
//! the backend can reject bad input before it reaches a service.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 1024, message = "password must be 1-1024 characters"))]
    pub password: String,
}

/// Login request
///
/// Only presence is checked here. A login with an impossible username simply
/// fails authentication like any other unknown user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Todo Types
// ============================================================================

/// Create todo request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTodoRequest {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Update todo request
///
/// `title` is optional at the wire level so that an absent field can be
/// reported as a bad request instead of a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
}
