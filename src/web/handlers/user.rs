//! User account handlers for Web API.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::Profile;
use crate::web::dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/users/register - Create an account and sign in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let result = state
        .sessions
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("User registered successfully", result)),
    ))
}

/// POST /api/users/login - Sign in with email and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let result = state.sessions.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse::new("Login successful", result)))
}

/// POST /api/users/logout - Clear the stored session token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.logout(&claims).await?;

    Ok(Json(MessageResponse::new("Logout successful")))
}

/// GET /api/users/profile - Get the signed-in user's profile.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.sessions.profile(&claims).await?;

    Ok(Json(profile))
}
