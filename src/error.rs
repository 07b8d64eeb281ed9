//! Error types for inkpost.

use thiserror::Error;

/// Common error type for inkpost.
#[derive(Error, Debug)]
pub enum BlogError {
    /// Database error.
    ///
    /// Wraps errors from either store backend. The message is passed through
    /// to API clients as-is.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A user with the same email is already registered.
    #[error("user already exists")]
    DuplicateUser,

    /// A uniquely-keyed record (slug, category name) already exists.
    #[error("{0}")]
    Conflict(String),

    /// Email unknown or password wrong. Deliberately undifferentiated.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, expired or revoked bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Password hashing failure.
    #[error("password error: {0}")]
    Password(#[from] crate::auth::PasswordError),

    /// Token signing failure.
    #[error("token error: {0}")]
    Token(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BlogError {
    fn from(e: sqlx::Error) -> Self {
        BlogError::Database(e.to_string())
    }
}

/// Returns true if the sqlx error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Result type alias for inkpost operations.
pub type Result<T> = std::result::Result<T, BlogError>;
