//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stowage API",
        version = "0.1.0",
        description = "Upload files into an object store under generated keys and download them back with a content type sniffed from the stored bytes."
    ),
    paths(
        handlers::root::root,
        handlers::upload::upload_file,
        handlers::download::download_file,
    ),
    components(
        schemas(
            error::ErrorResponse,
            handlers::root::RootResponse,
            handlers::upload::UploadResponse,
        )
    ),
    tags(
        (name = "files", description = "Upload and download"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
