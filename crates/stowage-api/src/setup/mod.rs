//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use stowage_core::Config;

/// Initialize telemetry, storage and routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry();

    config.validate().context("Configuration validation failed")?;

    tracing::info!(
        config_file = config.config_file.as_deref().unwrap_or("<none>"),
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config, storage));
    let router = routes::build_router(state.clone());

    Ok((state, router))
}
