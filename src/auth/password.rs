//! Password hashing for inkpost.
//!
//! Uses Argon2id with the crate's default parameters. Hashes are stored as
//! PHC strings, so the salt and parameters travel with the digest.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use std::sync::OnceLock;
use thiserror::Error;

/// Hash checked on logins for unknown emails, so that path also pays for one
/// Argon2 verification.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_password("inkpost-no-such-user").unwrap_or_default())
}

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Stored hash is not a valid PHC string.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password does not match the hash.
    #[error("password verification failed")]
    VerificationFailed,

    /// The blocking hash task did not complete.
    #[error("password task failed: {0}")]
    TaskFailed(String),
}

/// Hash a password using Argon2id.
///
/// # Examples
///
/// ```
/// use inkpost::hash_password;
///
/// let hash = hash_password("pw123").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// # Examples
///
/// ```
/// use inkpost::{hash_password, verify_password};
///
/// let hash = hash_password("pw123").unwrap();
/// assert!(verify_password("pw123", &hash).is_ok());
/// assert!(verify_password("pw124", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters come from the parsed hash.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_async(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_async(password: String, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
}

/// Run one verification against a fixed hash and discard the result.
pub async fn verify_dummy_async(password: String) {
    let _ = tokio::task::spawn_blocking(move || verify_password(&password, dummy_hash())).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_argon2id() {
        let hash = dummy_hash();
        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordHash::new(hash).is_ok());
        assert!(verify_password("pw123", hash).is_err());
    }

    #[tokio::test]
    async fn test_verify_dummy_async_completes() {
        verify_dummy_async("pw123".to_string()).await;
        assert!(DUMMY_HASH.get().is_some());
    }

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
    }

    #[test]
    fn test_hash_password_different_salts() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_short_password_accepted() {
        let hash = hash_password("pw").unwrap();
        assert!(verify_password("pw", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("correct_password").unwrap();

        let result = verify_password("wrong_password", &hash);
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("any_password", "not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_plaintext_is_not_a_hash() {
        let result = verify_password("pw123", "pw123");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hash = hash_password_async("日本語パスワード".to_string())
            .await
            .unwrap();

        assert!(verify_password_async("日本語パスワード".to_string(), hash.clone())
            .await
            .is_ok());
        assert!(verify_password_async("other".to_string(), hash)
            .await
            .is_err());
    }
}
