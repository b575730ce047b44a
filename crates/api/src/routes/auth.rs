//! Bearer-token authentication handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::user::UserPublic;
use crate::services::auth::{self, AuthService};
use crate::state::AppState;

/// Token request payload.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Issued token response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Exchange email + password for a signed bearer token.
///
/// # Errors
///
/// Returns 401 for wrong credentials.
pub async fn token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let service = AuthService::new(state.pool());
    let user = service.login(&body.email, &body.password).await?;

    let access_token = auth::issue_token(
        &user,
        &state.config().jwt_secret,
        state.config().token_expiry_minutes,
    )?;

    tracing::debug!(user_id = %user.id, "token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// Return the authenticated caller's account.
///
/// # Errors
///
/// Returns 401 for a missing/invalid token and 404 when the account behind
/// a valid token no longer exists.
pub async fn me(
    RequireAuth(auth_user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<UserPublic>, AppError> {
    let user = UserRepository::new(state.pool())
        .get_by_id(auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(user.into()))
}
