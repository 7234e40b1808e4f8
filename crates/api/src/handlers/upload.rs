//! Multipart upload handler for project file attachments.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use echotasks_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::files::FileStore;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Response body for `POST /uploads`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Opaque storage key, to be persisted in `file_path`/`file_paths`.
    pub path: String,
    /// Unsigned public download URL derived from the key.
    pub public_url: String,
}

/// POST /api/v1/uploads
///
/// Multipart form with a `project_id` text field and a `file` field.
/// Streams the bytes to the object store under
/// `{project_id}/{uuid}-{filename}` and returns the key plus its
/// public URL.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let store = state
        .files
        .as_ref()
        .ok_or_else(|| AppError::InternalError("File store is not configured".into()))?;

    let mut project_id: Option<DbId> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("project_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid project_id field: {e}")))?;
                project_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("project_id must be an integer".into()))?,
                );
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("file").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file field: {e}")))?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let project_id =
        project_id.ok_or_else(|| AppError::BadRequest("Missing project_id field".into()))?;
    let (filename, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing file field".into()))?;

    let key = FileStore::object_key(project_id, &filename);
    store
        .upload(&key, &content_type, bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Upload failed: {e}")))?;

    let public_url = store.public_url(&key);
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            path: key,
            public_url,
        }),
    ))
}
