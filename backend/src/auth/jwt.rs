//! JWT token generation and validation
//!
//! Tokens are HS256-signed with the current secret. Verification also
//! accepts secrets that were rotated out, so sessions survive a key change
//! until they expire.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys
///
/// `decoding` holds the current key first, then previous keys in the order
/// they were configured.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<[DecodingKey]>,
}

impl JwtKeys {
    /// Create keys from the current secret and any rotated-out secrets
    pub fn new<S: AsRef<str>>(secret: &str, previous_secrets: &[S]) -> Self {
        let decoding = std::iter::once(secret)
            .chain(previous_secrets.iter().map(AsRef::as_ref))
            .map(|s| DecodingKey::from_secret(s.as_bytes()))
            .collect::<Vec<_>>();

        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: decoding.into(),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &[DecodingKey] {
        &self.decoding
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    token_expiry_secs: i64,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new<S: AsRef<str>>(secret: &str, previous_secrets: &[S], token_expiry_secs: i64) -> Self {
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);
        // Expired means expired; no grace window past `exp`
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret, previous_secrets),
            validation: Arc::new(validation),
            token_expiry_secs,
        }
    }

    /// Issue a token for `username` that expires after the configured window
    pub fn issue_token(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.token_expiry_secs)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| {
                anyhow::anyhow!("Token expiry of {}s is out of range", self.token_expiry_secs)
            })?;

        let claims = Claims {
            sub: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token and return its claims
    ///
    /// Tries the current key, then each previous key. The error of the last
    /// attempt is reported; callers collapse all failures into one outcome.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut last_err = None;

        for key in self.keys.decoding() {
            match decode::<Claims>(token, key, &self.validation) {
                Ok(data) => {
                    if data.claims.sub.is_empty() {
                        return Err(anyhow::anyhow!("Token has an empty subject"));
                    }
                    return Ok(data.claims);
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(match last_err {
            Some(e) => anyhow::anyhow!("Invalid token: {}", e),
            None => anyhow::anyhow!("No verification keys configured"),
        })
    }

    /// Validate a token and return the username it was issued to
    #[inline]
    pub fn verify_username(&self, token: &str) -> Result<String> {
        self.validate_token(token).map(|claims| claims.sub)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PREVIOUS: &[&str] = &[];

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", NO_PREVIOUS, 86400)
    }

    fn sign(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate_token() {
        let service = create_test_service();

        let token = service.issue_token("alice").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new("other-secret", NO_PREVIOUS, 86400);

        let token = other.issue_token("alice").unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let token = sign(
            "test-secret",
            &Claims {
                sub: "alice".to_string(),
                exp: now - 3600,
                iat: now - 7200,
            },
        );

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_rejected_one_second_after_expiry() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let token = sign(
            "test-secret",
            &Claims {
                sub: "alice".to_string(),
                exp: now - 1,
                iat: now - 60,
            },
        );

        assert!(service.verify_username(&token).is_err());
    }

    #[test]
    fn test_out_of_range_expiry_fails_to_issue() {
        let service = JwtService::new("test-secret", NO_PREVIOUS, i64::MAX);
        assert!(service.issue_token("alice").is_err());
    }

    #[test]
    fn test_empty_subject_rejected() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let token = sign(
            "test-secret",
            &Claims {
                sub: String::new(),
                exp: now + 3600,
                iat: now,
            },
        );

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_rotated_secret_still_verifies() {
        let old = JwtService::new("old-secret", NO_PREVIOUS, 86400);
        let token = old.issue_token("alice").unwrap();

        let rotated = JwtService::new("new-secret", &["old-secret"], 86400);
        assert_eq!(rotated.verify_username(&token).unwrap(), "alice");

        // New tokens are signed with the new secret only
        let fresh = rotated.issue_token("bob").unwrap();
        assert!(old.validate_token(&fresh).is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone();
    }
}
