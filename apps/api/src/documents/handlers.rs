use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::documents::extract_text;
use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/documents/extract
///
/// Expects a multipart form with a `file` part.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let size = bytes.len();
        let name = file_name.clone();
        let text = tokio::task::spawn_blocking(move || extract_text(&bytes, name.as_deref()))
            .await
            .map_err(|e| AppError::Internal(e.into()))?
            .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

        info!(
            "Extracted {} chars from {} ({size} bytes)",
            text.len(),
            file_name.as_deref().unwrap_or("upload")
        );
        return Ok(Json(ExtractResponse { text }));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}
