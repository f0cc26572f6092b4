//! Password hashing using argon2
//!
//! Argon2 is intentionally CPU-intensive, so the async entry points run it
//! on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

/// Hash verified when a login names an unknown user, so that the miss costs
/// the same as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("not-a-real-password").ok());

/// Password hashing service (Argon2id, random salt per hash)
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a PHC hash string (blocking)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify against `hash`, or against the dummy hash when the user is
    /// unknown. Always `false` in the latter case.
    pub async fn verify_async(password: String, hash: Option<String>) -> Result<bool> {
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => Self::verify(&password, &hash),
            None => {
                if let Some(dummy) = DUMMY_HASH.as_deref() {
                    let _ = Self::verify(&password, dummy);
                }
                Ok(false)
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("p1").unwrap();

        assert!(PasswordService::verify("p1", &hash).unwrap());
        assert!(!PasswordService::verify("p2", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hash1 = PasswordService::hash("same").unwrap();
        let hash2 = PasswordService::hash("same").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hash1.starts_with("$argon2id$"));
    }

    #[test]
    fn test_plaintext_stored_value_is_rejected() {
        // A row holding a raw password is not a valid hash
        assert!(PasswordService::verify("password", "password").is_err());
    }

    #[tokio::test]
    async fn test_async_verify() {
        let hash = PasswordService::hash_async("p1".to_string()).await.unwrap();

        assert!(PasswordService::verify_async("p1".to_string(), Some(hash.clone()))
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("nope".to_string(), Some(hash))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_user_never_verifies() {
        assert!(!PasswordService::verify_async("not-a-real-password".to_string(), None)
            .await
            .unwrap());
    }
}
