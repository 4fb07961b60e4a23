//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p stowage-api`.
#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use std::sync::Arc;
use stowage_api::{build_router, AppState};
use stowage_core::{Config, StorageBackend};
use stowage_storage::{LocalStorage, Storage};

use fakes::{FixedToken, MemoryStorage};
use storage::TestStorage;

/// Token every test app hands out, so keys are predictable.
pub const TEST_TOKEN: &str = "test";

/// Configuration for tests: local backend, defaults otherwise.
pub fn test_config() -> Config {
    Config {
        storage_backend: StorageBackend::Local,
        ..Config::default()
    }
}

/// Wrap a state into a test server.
pub fn server_for(state: AppState) -> TestServer {
    let app = build_router(Arc::new(state));
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// State over the given store with the fixed `test` token.
pub fn state_with(config: Config, storage: Arc<dyn Storage>) -> AppState {
    AppState::new(config, storage).with_token_generator(Arc::new(FixedToken(TEST_TOKEN)))
}

/// Test application backed by an in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config())
}

pub fn setup_test_app_with(config: Config) -> TestApp {
    let storage = Arc::new(MemoryStorage::default());
    let server = server_for(state_with(config, storage.clone()));
    TestApp { server, storage }
}

/// Test application backed by `LocalStorage` in a temporary directory.
pub struct LocalTestApp {
    pub server: TestServer,
    pub storage: TestStorage,
}

pub async fn setup_local_test_app(config: Config) -> LocalTestApp {
    let storage = TestStorage::new();
    let backend = LocalStorage::new(storage.base_path.clone(), storage.base_url.clone())
        .await
        .expect("Failed to create local storage");
    let server = server_for(state_with(config, Arc::new(backend)));
    LocalTestApp { server, storage }
}
