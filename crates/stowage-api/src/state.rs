//! Application state shared by all handlers.
//!
//! Everything here is read-only after startup; the collaborators sit behind
//! trait objects so tests can swap in fakes.

use crate::services::{InferClassifier, MimeClassifier};
use std::sync::Arc;
use stowage_core::Config;
use stowage_storage::{Storage, TokenGenerator, UuidTokenGenerator};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub classifier: Arc<dyn MimeClassifier>,
    pub tokens: Arc<dyn TokenGenerator>,
}

impl AppState {
    /// State with the default classifier (honouring `mime_strict`) and UUID tokens.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let classifier = Arc::new(InferClassifier::new(config.mime_strict));
        Self {
            config,
            storage,
            classifier,
            tokens: Arc::new(UuidTokenGenerator),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn MimeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }
}
