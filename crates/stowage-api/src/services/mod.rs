pub mod mime;

pub use mime::{InferClassifier, MimeClassifier, MimeError};
