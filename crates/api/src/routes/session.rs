//! Cookie-session login handlers.
//!
//! Unlike `/auth/token`, these store the login server-side in a
//! tower-sessions session and identify the caller by cookie.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use pocket_market_core::UserId;

use crate::error::AppError;
use crate::models::session_keys;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form payload.
#[derive(Debug, Deserialize)]
pub struct SessionLoginRequest {
    pub email: String,
    pub password: String,
}

/// Session status response.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub user_id: Option<UserId>,
}

/// Login and store the user id in the session.
///
/// # Errors
///
/// Returns 401 for wrong credentials and 500 if the session store fails.
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<SessionLoginRequest>,
) -> Result<Json<SessionStatus>, AppError> {
    let service = AuthService::new(state.pool());
    let user = service.login(&body.email, &body.password).await?;

    session
        .insert(session_keys::CURRENT_USER, user.id)
        .await
        .map_err(|e| AppError::Internal(format!("session store: {e}")))?;

    tracing::debug!(user_id = %user.id, "session login");

    Ok(Json(SessionStatus {
        logged_in: true,
        user_id: Some(user.id),
    }))
}

/// Report whether the caller has a live session.
///
/// # Errors
///
/// Returns 500 if the session store fails.
pub async fn me(session: Session) -> Result<Json<SessionStatus>, AppError> {
    let user_id: Option<UserId> = session
        .get(session_keys::CURRENT_USER)
        .await
        .map_err(|e| AppError::Internal(format!("session store: {e}")))?;

    Ok(Json(SessionStatus {
        logged_in: user_id.is_some(),
        user_id,
    }))
}

/// Clear the caller's session.
///
/// # Errors
///
/// Returns 500 if the session store fails.
pub async fn logout(session: Session) -> Result<Json<SessionStatus>, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session store: {e}")))?;

    Ok(Json(SessionStatus {
        logged_in: false,
        user_id: None,
    }))
}
