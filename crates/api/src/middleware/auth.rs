//! Bearer-token authentication extractors.
//!
//! Provides extractors for requiring a valid `Authorization: Bearer <token>`
//! header in route handlers. Token claims carry everything the handlers
//! need, so no database round trip happens here.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use pocket_market_core::UserId;

use crate::error::AppError;
use crate::services::auth::{self, AuthError};
use crate::state::AppState;

/// The authenticated caller, as carried by their token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub is_admin: bool,
}

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

/// Extractor that requires a valid bearer token for an admin user.
///
/// Non-admin callers get 403.
pub struct RequireAdmin(pub AuthUser);

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let header_value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_owned()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid auth scheme".to_owned()))?;

    let claims = auth::verify_token(token, &state.config().jwt_secret)
        .map_err(|_| AppError::Auth(AuthError::InvalidToken))?;

    Ok(AuthUser {
        id: claims.user_id()?,
        email: claims.email,
        is_admin: claims.is_admin,
    })
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        authenticate(parts, &state).map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let user = authenticate(parts, &state)?;

        if !user.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_owned()));
        }

        Ok(Self(user))
    }
}
