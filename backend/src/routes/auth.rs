//! Authentication routes
//!
//! Registration and login. Password hashing runs on the blocking thread
//! pool and the token is signed with the pre-computed key from AppState.

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use todo_shared::{LoginRequest, LoginResponse, RegisterRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/register
///
/// Registering an existing username succeeds without changing anything.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<StatusCode> {
    UserService::register(state.store(), &req.username, &req.password).await?;
    Ok(StatusCode::OK)
}

/// Login with username and password
///
/// POST /api/login
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = UserService::login(state.store(), state.jwt(), &req.username, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}
