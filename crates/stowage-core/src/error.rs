//! Error types module
//!
//! All request failures are unified under `AppError`. Each variant knows the
//! HTTP status it maps to and the fixed message a client is allowed to see;
//! the wrapped detail is for operators only and never leaves the process.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing form field
    Debug,
    /// Warning level - for malformed but harmless input
    Warn,
    /// Error level - for backend failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED"), used in logs
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

pub const MISSING_UPLOAD_FILE_MESSAGE: &str = "you need to provide a file to upload";
pub const MISSING_DOWNLOAD_KEY_MESSAGE: &str = "you must provide a file to download";
pub const KEY_UNESCAPE_MESSAGE: &str = "file key could not be unescaped";
pub const UPLOAD_FAILED_MESSAGE: &str = "there was an error uploading";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "there was an error downloading";
pub const MIME_DETECTION_MESSAGE: &str = "there was an error reading the mime type";
pub const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The multipart body had no `file` part, or could not be read at all.
    #[error("Missing upload file: {0}")]
    MissingUploadFile(String),

    #[error("Missing download key")]
    MissingDownloadKey,

    #[error("Storage key could not be unescaped: {0}")]
    KeyUnescape(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("MIME detection failed: {0}")]
    MimeDetection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, client_message, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::MissingUploadFile(_) => (
            400,
            "MISSING_UPLOAD_FILE",
            MISSING_UPLOAD_FILE_MESSAGE,
            LogLevel::Debug,
        ),
        AppError::MissingDownloadKey => (
            400,
            "MISSING_DOWNLOAD_KEY",
            MISSING_DOWNLOAD_KEY_MESSAGE,
            LogLevel::Debug,
        ),
        AppError::KeyUnescape(_) => (500, "KEY_UNESCAPE", KEY_UNESCAPE_MESSAGE, LogLevel::Warn),
        AppError::UploadFailed(_) => (500, "UPLOAD_FAILED", UPLOAD_FAILED_MESSAGE, LogLevel::Error),
        AppError::DownloadFailed(_) => (
            500,
            "DOWNLOAD_FAILED",
            DOWNLOAD_FAILED_MESSAGE,
            LogLevel::Error,
        ),
        AppError::MimeDetection(_) => (
            500,
            "MIME_DETECTION_FAILED",
            MIME_DETECTION_MESSAGE,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", INTERNAL_MESSAGE, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        app_error_static_metadata(self).2.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

impl AppError {
    /// Variant name, recorded as `error_type` in logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingUploadFile(_) => "MissingUploadFile",
            AppError::MissingDownloadKey => "MissingDownloadKey",
            AppError::KeyUnescape(_) => "KeyUnescape",
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::DownloadFailed(_) => "DownloadFailed",
            AppError::MimeDetection(_) => "MimeDetection",
            AppError::Internal(_) => "Internal",
        }
    }
}
