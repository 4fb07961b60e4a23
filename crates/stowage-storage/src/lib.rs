//! Stowage Storage Library
//!
//! This crate provides the object-store abstraction used by the upload and
//! download handlers, with implementations for S3 and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are `{folder}{token}{extension}`: the caller-supplied folder segment
//! (verbatim, possibly empty), a freshly generated token, and the extension of
//! the original filename including its dot. Key generation lives in the `keys`
//! module so every caller derives keys the same way.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{file_extension, generate_storage_key, TokenGenerator, UuidTokenGenerator};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use stowage_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
