//! Common test utilities for integration tests
//!
//! The harness drives the full router (middleware included) over an
//! in-memory store, so these tests run without a database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use todo_backend::{
    config::AppConfig, repositories::MemoryStore, routes, services::UserService, state::AppState,
};
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

/// Response captured for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        UserService::register(
            store.as_ref(),
            &config.bootstrap.admin_username,
            &config.bootstrap.admin_password,
        )
        .await
        .expect("Failed to seed admin");

        let state = AppState::new(store.clone(), config);
        let app = routes::create_router(state.clone());

        Self { app, state, store }
    }

    /// Send a request with an optional bearer token and raw body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request("GET", path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &str) -> TestResponse {
        self.request("POST", path, token, Some(body)).await
    }

    /// Register and log in, returning the token
    pub async fn login_as(&self, username: &str, password: &str) -> String {
        let creds = serde_json::json!({ "username": username, "password": password }).to_string();

        let registered = self.post("/api/register", None, &creds).await;
        assert_eq!(registered.status, StatusCode::OK);

        let login = self.post("/api/login", None, &creds).await;
        assert_eq!(login.status, StatusCode::OK);
        login.json()["token"].as_str().unwrap().to_string()
    }

    /// Create a todo and return its JSON
    pub async fn add_todo(&self, token: &str, title: &str) -> Value {
        let body = serde_json::json!({ "title": title, "done": false }).to_string();
        let response = self.post("/todos", Some(token), &body).await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.jwt.secret = "test-secret-key-for-testing-only-32chars".to_string();
    config
}
