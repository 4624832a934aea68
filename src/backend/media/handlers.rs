//! Upload HTTP Handler
//!
//! Implements `POST /api/upload`: a multipart form with a single `file`
//! field, stored under the media root with a timestamped name. The client
//! then references the returned filename when creating a post or setting a
//! profile picture.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;

use super::store::{MediaStore, MAX_UPLOAD_BYTES};

/// Response for a successful upload
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UploadResponse {
    /// Name the file was stored under (serve via `/images/{filename}`)
    pub filename: String,
}

/// Upload handler (POST /api/upload)
///
/// # Errors
///
/// * `400 Bad Request` - If the form has no `file` field or the multipart
///   body is malformed
/// * `413 Payload Too Large` - If the file exceeds 1 MiB
/// * `500 Internal Server Error` - If the file cannot be written
pub async fn upload(
    State(store): State<MediaStore>,
    AuthUser(auth): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("failed to read upload: {}", e)))?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::payload_too_large(format!(
                "file exceeds {} bytes",
                MAX_UPLOAD_BYTES
            )));
        }

        let filename = MediaStore::stored_name(&original_name);
        store.save(&filename, &bytes).await?;

        tracing::info!(
            "User {} uploaded {} as {}",
            auth.user_id,
            original_name,
            filename
        );

        return Ok(Json(UploadResponse { filename }));
    }

    Err(ApiError::validation("no file uploaded"))
}
