//! HTTP surface of Stowage: upload files into an object store and download
//! them back with a sniffed content type.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use setup::routes::build_router;
pub use state::AppState;
