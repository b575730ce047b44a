//! User signup handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::user::UserPublic;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Signup payload.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Create a new user account.
///
/// # Errors
///
/// Returns 422 for a malformed email or weak password and 409 when the
/// email is already registered.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let auth = AuthService::new(state.pool());

    let user = auth
        .register(&body.first_name, &body.last_name, &body.email, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}
