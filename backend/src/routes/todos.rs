//! Todo API routes
//!
//! All routes require a bearer token. `AuthUser` is extracted before the
//! path and body, so an unauthenticated request gets its 401 before
//! anything else is looked at.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::TodoService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use todo_shared::{NewTodoRequest, Todo, UpdateTodoRequest};
use tracing::debug;

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(add_todo))
        .route("/:id", put(update_todo).delete(delete_todo))
        .route("/:id/toggle", post(toggle_todo))
}

/// GET /todos - List the caller's todos
async fn list_todos(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<Todo>>> {
    let todos = TodoService::list(state.store(), &auth.username).await?;
    debug!(username = %auth.username, count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

/// POST /todos - Create a todo owned by the caller
async fn add_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<NewTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let todo = TodoService::add(state.store(), &auth.username, req.title, req.done).await?;
    Ok(Json(todo))
}

/// PUT /todos/:id - Replace a todo's title
async fn update_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let todo = TodoService::update_title(state.store(), &auth.username, &id, req.title).await?;
    Ok(Json(todo))
}

/// POST /todos/:id/toggle - Flip a todo's done flag
async fn toggle_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Todo>> {
    let todo = TodoService::toggle(state.store(), &auth.username, &id).await?;
    Ok(Json(todo))
}

/// DELETE /todos/:id - Delete a todo
async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    TodoService::delete(state.store(), &auth.username, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
