//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction. It is read-only
//! after construction; all mutable data lives in the store.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::Store;
use std::sync::Arc;

/// Shared application state
///
/// - `store`: injected persistence, PostgreSQL in production
/// - `config`: wrapped in Arc, cloning is O(1)
/// - `jwt`: pre-computed keys wrapped in Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub jwt: JwtService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the config secrets. Call once at startup.
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            &config.jwt.previous_secrets,
            config.jwt.token_expiry_secs,
        );

        Self {
            store,
            config: Arc::new(config),
            jwt,
        }
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
