use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, Method, StatusCode},
    response::Response,
    Form,
};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use stowage_core::AppError;
use utoipa::IntoParams;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Key of the object to download, from the query string or a form body.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadParams {
    /// Storage key returned by `/upload`
    pub file: Option<String>,
    /// Prefix prepended to `file`
    pub folder: Option<String>,
}

impl DownloadParams {
    /// Fill fields missing here from `fallback`.
    fn or(self, fallback: DownloadParams) -> Self {
        DownloadParams {
            file: self.file.or(fallback.file),
            folder: self.folder.or(fallback.folder),
        }
    }

    /// Resolve the full storage key: folder followed by the unescaped file key.
    pub fn storage_key(self) -> Result<String, AppError> {
        let file = self
            .file
            .filter(|f| !f.is_empty())
            .ok_or(AppError::MissingDownloadKey)?;

        let file = query_unescape(&file)?;

        Ok(format!("{}{}", self.folder.unwrap_or_default(), file))
    }
}

/// Query-string unescape: `+` is a space and every `%` must start a two digit
/// hex escape. The decoded bytes must be UTF-8.
fn query_unescape(raw: &str) -> Result<String, AppError> {
    let bytes = raw.as_bytes();
    let malformed = bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if malformed {
        return Err(AppError::KeyUnescape(format!("invalid escape in {:?}", raw)));
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| AppError::KeyUnescape(e.to_string()))
}

async fn read_download_form(mut multipart: Multipart) -> Result<DownloadParams, AppError> {
    let mut params = DownloadParams::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to read download form");
        AppError::MissingDownloadKey
    })? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();
        let slot = match field_name.as_str() {
            "file" => &mut params.file,
            "folder" => &mut params.folder,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }
        let value = field.text().await.map_err(|e| {
            tracing::debug!(error = %e, field = %field_name, "Failed to read download form field");
            AppError::MissingDownloadKey
        })?;
        *slot = Some(value);
    }

    Ok(params)
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// `GET` reads the query string. `POST` reads an urlencoded or multipart body
/// and falls back to the query string for fields the body lacks.
impl<S> FromRequest<S> for DownloadParams
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<DownloadParams>::try_from_uri(req.uri())
            .map(|Query(params)| params)
            .unwrap_or_default();

        if req.method() != Method::POST {
            return Ok(from_query);
        }

        let from_body = if is_multipart(&req) {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => read_download_form(multipart).await?,
                Err(rejection) => {
                    tracing::debug!(error = %rejection.body_text(), "Unreadable multipart body");
                    DownloadParams::default()
                }
            }
        } else {
            match Form::<DownloadParams>::from_request(req, state).await {
                Ok(Form(params)) => params,
                Err(rejection) => {
                    tracing::debug!(error = %rejection.body_text(), "Unreadable form body");
                    DownloadParams::default()
                }
            }
        };

        Ok(from_body.or(from_query))
    }
}

/// Download a file from the object store
///
/// The content type of the response is classified from the stored bytes.
#[utoipa::path(
    method(get, post),
    path = "/download",
    tag = "files",
    params(DownloadParams),
    responses(
        (status = 200, description = "Raw file content", content_type = "application/octet-stream"),
        (status = 400, description = "No file key given", body = ErrorResponse),
        (status = 500, description = "Fetch or MIME classification failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, params), fields(operation = "download_file"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    params: DownloadParams,
) -> Result<Response, HttpAppError> {
    let storage_key = params.storage_key()?;

    let data = state.storage.download(&storage_key).await.map_err(|e| {
        tracing::error!(error = %e, storage_key = %storage_key, "Failed to download");
        AppError::DownloadFailed(e.to_string())
    })?;

    let mime_type = state.classifier.classify(&data).map_err(|e| {
        tracing::error!(
            error = %e,
            storage_key = %storage_key,
            size_bytes = data.len(),
            "Failed to read mime type"
        );
        AppError::MimeDetection(e.to_string())
    })?;

    tracing::debug!(
        storage_key = %storage_key,
        mime_type = %mime_type,
        size_bytes = data.len(),
        "Serving file"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type)
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
