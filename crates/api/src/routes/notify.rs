//! Background notification handler.
//!
//! The handler answers immediately; the log append happens in a spawned
//! task so slow disk I/O never blocks the response. The route is gated by
//! the `X-API-Key` middleware (see `routes::routes`).

use std::path::PathBuf;

use axum::{Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::state::AppState;

/// Notification request parameters.
#[derive(Debug, Deserialize)]
pub struct NotifyParams {
    pub message: String,
}

/// Queue acknowledgement.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub status: &'static str,
}

/// Append a line to the notification log.
async fn write_to_log(path: PathBuf, message: String) {
    let result = async {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(format!("{message}\n").as_bytes()).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = result {
        tracing::error!(log = %path.display(), error = %e, "failed to write notification");
    }
}

/// Queue a notification message.
///
/// # Errors
///
/// Returns 400 for an empty message.
pub async fn notify(
    State(state): State<AppState>,
    Query(params): Query<NotifyParams>,
) -> Result<Json<NotifyResponse>, AppError> {
    if params.message.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_owned()));
    }

    let log_path = state.config().notify_log.clone();
    tokio::spawn(write_to_log(log_path, params.message));

    Ok(Json(NotifyResponse { status: "queued" }))
}
