//! Static page routes
//!
//! The HTML pages and their assets are served byte-for-byte from the
//! configured static directory.

use crate::state::AppState;
use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// `/`, `/login`, `/register` and everything under `/static`
pub fn page_routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/login", ServeFile::new(static_dir.join("login.html")))
        .route_service("/register", ServeFile::new(static_dir.join("register.html")))
        .nest_service("/static", ServeDir::new(static_dir))
}
