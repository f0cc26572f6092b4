//! Authentication extractor
//!
//! Every failure mode (no header, wrong scheme, bad signature, expired
//! token) becomes the same `ApiError::Unauthorized`, which renders as a bare
//! 401. The reason is kept for the debug log only.

use crate::auth::JwtService;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

/// Authenticated caller extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Resolve the caller's username from `Authorization: Bearer <token>`
pub fn authorize(headers: &HeaderMap, jwt: &JwtService) -> Result<String, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

    jwt.verify_username(token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let username = authorize(&parts.headers, app_state.jwt())?;
        Ok(AuthUser { username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn jwt() -> JwtService {
        JwtService::new("middleware-test-secret", &[] as &[&str], 3600)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authorize_accepts_valid_bearer() {
        let jwt = jwt();
        let token = jwt.issue_token("alice").unwrap();

        let username = authorize(&headers_with(&format!("Bearer {}", token)), &jwt).unwrap();
        assert_eq!(username, "alice");
    }

    #[test]
    fn test_authorize_rejects_missing_header() {
        let result = authorize(&HeaderMap::new(), &jwt());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_authorize_rejects_other_scheme() {
        let jwt = jwt();
        let token = jwt.issue_token("alice").unwrap();

        let result = authorize(&headers_with(&format!("Token {}", token)), &jwt);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_authorize_rejects_garbage_token() {
        let result = authorize(&headers_with("Bearer abc.def.ghi"), &jwt());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
