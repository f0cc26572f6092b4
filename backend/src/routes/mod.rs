//! Route definitions for the todo API
//!
//! This module organizes all routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod pages;
mod todos;


pub use auth::auth_routes;
pub use pages::page_routes;
pub use todos::todo_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let static_dir = PathBuf::from(&state.config().server.static_dir);

    Router::new()
        .merge(page_routes(&static_dir))
        .nest("/api", auth_routes())
        .nest("/todos", todo_routes())
        .route("/test-db", get(health::test_db))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
