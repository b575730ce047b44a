//! Multipart file upload handler.

use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Upload result returned to the client.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub content_type: Option<String>,
    pub size_bytes: usize,
    pub description: String,
}

/// Keep only the final path component and drop anything shell-hostile.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.bin");

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Accept a multipart form with a `description` text field and a `file` part,
/// store the file under the configured upload directory, and report its
/// metadata.
///
/// # Errors
///
/// Returns 400 when the `file` part is missing or the body is malformed and
/// 500 when the file cannot be written.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut description = String::new();
    let mut stored: Option<UploadResponse> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("description") => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Bad description field: {e}")))?;
            }
            Some("file") => {
                let filename =
                    sanitize_filename(field.file_name().unwrap_or("upload.bin"));
                let content_type = field.content_type().map(String::from);

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Bad file field: {e}")))?;

                let upload_dir = &state.config().upload_dir;
                tokio::fs::create_dir_all(upload_dir)
                    .await
                    .map_err(|e| AppError::Internal(format!("create upload dir: {e}")))?;

                let dest = upload_dir.join(&filename);
                tokio::fs::write(&dest, &bytes)
                    .await
                    .map_err(|e| AppError::Internal(format!("write upload: {e}")))?;

                tracing::info!(file = %dest.display(), size = bytes.len(), "file uploaded");

                stored = Some(UploadResponse {
                    filename,
                    content_type,
                    size_bytes: bytes.len(),
                    description: String::new(),
                });
            }
            _ => {}
        }
    }

    let mut response =
        stored.ok_or_else(|| AppError::BadRequest("Missing file field".to_owned()))?;
    response.description = description;

    Ok((StatusCode::CREATED, Json(response)))
}
