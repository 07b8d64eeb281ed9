//! API error handling for inkpost.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::BlogError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Not found (404).
    NotFound,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a bad request error from validator::ValidationErrors.
    ///
    /// Messages are ordered by field name and joined with "; ".
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();

        Self::bad_request(messages.join("; "))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::Validation(msg) | BlogError::Conflict(msg) => ApiError::bad_request(msg),
            BlogError::DuplicateUser => ApiError::bad_request("User already exists"),
            BlogError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
            BlogError::Unauthorized(msg) => ApiError::unauthorized(msg),
            BlogError::NotFound(what) => ApiError::not_found(format!("{} not found", what)),
            BlogError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                ApiError::internal(msg)
            }
            other => {
                tracing::error!("Internal error: {}", other);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_blog_error() {
        let err = ApiError::from(BlogError::DuplicateUser);
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "User already exists");

        let err = ApiError::from(BlogError::InvalidCredentials);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid email or password");

        let err = ApiError::from(BlogError::NotFound("Post".to_string()));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Post not found");

        let err = ApiError::from(BlogError::Conflict("Category already exists".to_string()));
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[test]
    fn test_database_message_passed_through() {
        let err = ApiError::from(BlogError::Database("no such table: posts".to_string()));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "no such table: posts");
    }

    #[test]
    fn test_other_internal_errors_hidden() {
        let err = ApiError::from(BlogError::Token("bad key".to_string()));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "An internal error occurred");
    }

    #[test]
    fn test_validation_errors_joined() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "title",
            validator::ValidationError::new("required").with_message("Title is required".into()),
        );
        errors.add(
            "author",
            validator::ValidationError::new("required").with_message("Author is required".into()),
        );

        let err = ApiError::from_validation_errors(errors);
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Author is required; Title is required");
    }
}
