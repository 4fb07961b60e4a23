//! Shared key generation for uploads.
//!
//! Key format: `{folder}{token}{extension}`.

use uuid::Uuid;

/// Source of unique tokens for new storage keys.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Extension of the last path element, including the dot.
///
/// Returns an empty string when the last element has no `.`. A leading dot
/// counts, so `.bashrc` is its own extension.
pub fn file_extension(filename: &str) -> &str {
    let start = filename.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let base = &filename[start..];
    match base.rfind('.') {
        Some(dot) => &base[dot..],
        None => "",
    }
}

/// Generate a storage key for an upload.
pub fn generate_storage_key(folder: &str, token: &str, original_filename: &str) -> String {
    format!("{}{}{}", folder, token, file_extension(original_filename))
}
