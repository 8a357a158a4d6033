use std::sync::Arc;

use crate::services::{playback::SourceChain, providers::MetadataProvider};

/// Shared application state
///
/// Holds the seams the handlers work through: the metadata provider behind
/// the search endpoints and the source chain behind playback resolution.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    pub sources: Arc<SourceChain>,
}

impl AppState {
    pub fn new(provider: Arc<dyn MetadataProvider>, sources: Arc<SourceChain>) -> Self {
        Self { provider, sources }
    }
}
