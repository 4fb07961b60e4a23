//! In-process fakes for the store, classifier and token source.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use stowage_api::services::{InferClassifier, MimeClassifier, MimeError};
use stowage_core::StorageBackend;
use stowage_storage::{Storage, StorageError, StorageResult, TokenGenerator};

/// Hands out the same token every time.
pub struct FixedToken(pub &'static str);

impl TokenGenerator for FixedToken {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Store keeping objects in a map and counting calls.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Bytes>>,
    uploads: AtomicUsize,
    downloads: AtomicUsize,
}

impl MemoryStorage {
    pub fn location_of(key: &str) -> String {
        format!("memory://bucket/{}", key)
    }

    pub fn insert(&self, key: &str, data: impl Into<Bytes>) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), data.into());
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn upload_calls(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(&self, storage_key: &str, data: Bytes) -> StorageResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.insert(storage_key, data);
        Ok(Self::location_of(storage_key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Bytes> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        self.get(storage_key)
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Store whose every call fails.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(&self, _storage_key: &str, _data: Bytes) -> StorageResult<String> {
        Err(StorageError::UploadFailed("bucket unavailable".to_string()))
    }

    async fn download(&self, _storage_key: &str) -> StorageResult<Bytes> {
        Err(StorageError::DownloadFailed("bucket unavailable".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Classifier that always fails.
pub struct FailingClassifier;

impl MimeClassifier for FailingClassifier {
    fn classify(&self, data: &[u8]) -> Result<String, MimeError> {
        Err(MimeError::Unrecognized { size: data.len() })
    }
}

/// Default classifier that counts how often it runs.
#[derive(Default)]
pub struct CountingClassifier {
    inner: InferClassifier,
    calls: AtomicUsize,
}

impl CountingClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MimeClassifier for CountingClassifier {
    fn classify(&self, data: &[u8]) -> Result<String, MimeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.classify(data)
    }
}
