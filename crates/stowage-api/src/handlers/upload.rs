use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use stowage_core::{AppError, UploadResponseMode};
use stowage_storage::generate_storage_key;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const FOLDER_FIELD: &str = "folder";

/// Body of a successful upload: the storage key, or the store location.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UploadResponse {
    Key { file: String },
    Location { url: String },
}

/// The parts of an upload form the handler cares about.
#[derive(Debug)]
pub struct UploadForm {
    pub filename: String,
    pub data: Bytes,
    pub folder: String,
}

/// Read the `file` and `folder` fields from a multipart body.
///
/// The first file part named `file` and the first `folder` field win. Any
/// read failure, including a body over the size limit, is reported as a
/// missing file.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MissingUploadFile(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            // Only a real file part counts; a plain text `file` field is ignored.
            FILE_FIELD if file.is_none() && field.file_name().is_some() => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::MissingUploadFile(format!("Failed to read file data: {}", e))
                })?;
                file = Some((filename, data));
            }
            FOLDER_FIELD if folder.is_none() => {
                let value = field.text().await.map_err(|e| {
                    AppError::MissingUploadFile(format!("Failed to read folder field: {}", e))
                })?;
                folder = Some(value);
            }
            _ => {}
        }
    }

    let (filename, data) = file.ok_or_else(|| {
        AppError::MissingUploadFile(format!("No '{}' field in form", FILE_FIELD))
    })?;

    Ok(UploadForm {
        filename,
        data,
        folder: folder.unwrap_or_default(),
    })
}

/// Upload a file to the object store
///
/// The storage key is the optional folder, a fresh unique token, and the
/// extension of the uploaded filename.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file in the form", body = ErrorResponse),
        (status = 500, description = "Object store write failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|e| AppError::MissingUploadFile(e.body_text()))?;
    let form = read_upload_form(multipart).await?;

    let token = state.tokens.generate();
    let storage_key = generate_storage_key(&form.folder, &token, &form.filename);
    let size_bytes = form.data.len();

    let location = state
        .storage
        .upload(&storage_key, form.data)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                storage_key = %storage_key,
                size_bytes,
                "Failed to upload"
            );
            AppError::UploadFailed(e.to_string())
        })?;

    tracing::info!(storage_key = %storage_key, size_bytes, "Successfully uploaded");

    let body = match state.config.upload_response {
        UploadResponseMode::Key => UploadResponse::Key { file: storage_key },
        UploadResponseMode::Location => UploadResponse::Location { url: location },
    };

    Ok(Json(body))
}
