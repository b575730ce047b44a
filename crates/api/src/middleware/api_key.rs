//! `X-API-Key` gate for service-to-service endpoints.
//!
//! A missing header is 401, a wrong key is 403. When no key is configured
//! the gated routes reject everything, so they cannot be left open by
//! accident.

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::state::AppState;

/// The HTTP header name carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware that checks `X-API-Key` against the configured key.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when the header is missing and
/// `AppError::Forbidden` when it does not match.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing X-API-Key".to_owned()))?;

    let expected = state
        .config()
        .service_api_key
        .as_ref()
        .ok_or_else(|| AppError::Forbidden("Service API key not configured".to_owned()))?;

    if provided != expected.expose_secret() {
        return Err(AppError::Forbidden("Invalid X-API-Key".to_owned()));
    }

    Ok(next.run(req).await)
}
