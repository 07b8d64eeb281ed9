//! Bearer token authentication.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, SessionManager};
use crate::web::error::ApiError;

/// State shared with the [`AuthUser`] extractor.
#[derive(Clone)]
pub struct JwtState {
    sessions: SessionManager,
    strict_revocation: bool,
}

impl JwtState {
    /// Create a new JWT state.
    ///
    /// With `strict_revocation` the presented token must also match the one
    /// stored on the user, so logout revokes it immediately.
    pub fn new(sessions: SessionManager, strict_revocation: bool) -> Self {
        Self {
            sessions,
            strict_revocation,
        }
    }
}

/// Extractor for authenticated users.
///
/// Handlers taking this extractor receive the verified token claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?
            .trim()
            .to_string();

        let jwt_state = parts
            .extensions
            .get::<Arc<JwtState>>()
            .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

        let claims = jwt_state
            .sessions
            .issuer()
            .verify(&token)
            .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;

        if jwt_state.strict_revocation && !jwt_state.sessions.is_current(&claims, &token).await? {
            tracing::debug!(user_id = claims.id, "Rejected revoked token");
            return Err(ApiError::unauthorized("Not authorized, token revoked"));
        }

        Ok(AuthUser(claims))
    }
}

/// Middleware function to inject JWT state into request extensions.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}
