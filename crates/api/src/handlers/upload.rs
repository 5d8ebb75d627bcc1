//! Handler for `POST /uploads`, the first phase of creating a profile or
//! poster: store the image, hand back its URL.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::error::CoreError;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::storage::{extension_for, ALLOWED_IMAGE_TYPES};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/v1/uploads
///
/// Multipart form with a single `file` field holding an image.
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let max_bytes = state.config.uploads.max_bytes;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let extension = extension_for(&content_type).ok_or_else(|| {
            let allowed: Vec<&str> = ALLOWED_IMAGE_TYPES.iter().map(|(ct, _)| *ct).collect();
            AppError::Core(CoreError::Validation(format!(
                "Unsupported file type '{content_type}'. Allowed: {}",
                allowed.join(", ")
            )))
        })?;

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Uploaded file is empty".into(),
            )));
        }
        if data.len() > max_bytes {
            return Err(AppError::Core(CoreError::Validation(format!(
                "File exceeds the {max_bytes} byte upload limit"
            ))));
        }

        let url = state.blobs.put(&data, extension).await?;

        tracing::info!(%url, size = data.len(), "Image uploaded");
        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::BadRequest("Missing required 'file' field".into()))
}
