//! User service for registration and login
//!
//! Password hashing and verification run on the blocking thread pool. Login
//! failures never say whether the username or the password was wrong.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{Store, UserRepository};
use tracing::{debug, info};

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a user; registering an existing username is a successful no-op
    ///
    /// Returns whether a new account was created.
    pub async fn register(store: &dyn Store, username: &str, password: &str) -> Result<bool, ApiError> {
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let created = store
            .create_if_absent(username, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if created {
            info!(username = %username, "User registered");
        } else {
            debug!(username = %username, "Registration for existing user ignored");
        }

        Ok(created)
    }

    /// Check credentials and issue a token
    pub async fn login(
        store: &dyn Store,
        jwt_service: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let stored_hash = store
            .find_by_username(username)
            .await
            .map_err(ApiError::Internal)?
            .map(|user| user.password_hash);

        let valid = PasswordService::verify_async(password.to_string(), stored_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = jwt_service
            .issue_token(username)
            .map_err(ApiError::Internal)?;

        info!(username = %username, "User logged in");
        Ok(token)
    }
}
