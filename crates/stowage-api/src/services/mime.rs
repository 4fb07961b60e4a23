//! MIME classification from raw content.
//!
//! The type is inferred from magic numbers in the bytes themselves; the
//! filename or client-supplied content type is never consulted.

use thiserror::Error;

pub const EMPTY_MIME_TYPE: &str = "application/x-empty";
pub const TEXT_MIME_TYPE: &str = "text/plain";
pub const BINARY_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum MimeError {
    #[error("Unrecognized content ({size} bytes)")]
    Unrecognized { size: usize },
}

/// Classifies a byte buffer into a MIME type string.
pub trait MimeClassifier: Send + Sync {
    fn classify(&self, data: &[u8]) -> Result<String, MimeError>;
}

/// Signature-based classifier backed by the `infer` crate.
///
/// Unknown content falls back to `text/plain` for UTF-8 text and to
/// `application/octet-stream` otherwise. A strict classifier refuses the
/// binary fallback instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferClassifier {
    strict: bool,
}

impl InferClassifier {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl MimeClassifier for InferClassifier {
    fn classify(&self, data: &[u8]) -> Result<String, MimeError> {
        if data.is_empty() {
            return Ok(EMPTY_MIME_TYPE.to_string());
        }

        if let Some(kind) = infer::get(data) {
            return Ok(kind.mime_type().to_string());
        }

        if !data.contains(&0) && std::str::from_utf8(data).is_ok() {
            return Ok(TEXT_MIME_TYPE.to_string());
        }

        if self.strict {
            return Err(MimeError::Unrecognized { size: data.len() });
        }

        Ok(BINARY_MIME_TYPE.to_string())
    }
}
