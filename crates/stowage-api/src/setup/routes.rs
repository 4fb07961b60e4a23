//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Build the application router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let max_upload_size_bytes = state.config.max_upload_size_bytes;

    Router::new()
        .route("/", get(handlers::root::root))
        .route("/upload", post(handlers::upload::upload_file))
        .route(
            "/download",
            get(handlers::download::download_file).post(handlers::download::download_file),
        )
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(max_upload_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
