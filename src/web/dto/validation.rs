//! Request body extraction and the field rules shared by the DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::db::slugify;
use crate::web::error::ApiError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON rejects with 400 "Invalid JSON: ...". Failed rules reject
/// with 400 and the field messages joined by "; ".
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(status = %rejection.status(), "Unreadable request body");
            ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text()))
        })?;

        if let Err(errors) = value.validate() {
            let error = ApiError::from_validation_errors(errors);
            tracing::debug!(reason = error.message(), "Request body failed validation");
            return Err(error);
        }

        Ok(ValidatedJson(value))
    }
}

/// Rejects blank text. The message comes from the field's `validate`
/// attribute, e.g. "Author is required".
pub fn present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("present"));
    }
    Ok(())
}

/// A post title must be present and must yield a non-empty slug, since the
/// slug is the post's public address.
pub fn post_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("present").with_message("Title is required".into()));
    }
    if slugify(title).is_empty() {
        return Err(ValidationError::new("slug")
            .with_message("Title must contain letters or numbers".into()));
    }
    Ok(())
}
