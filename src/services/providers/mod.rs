//! Metadata provider abstraction
//!
//! The search pipeline treats title lookup as a supplied capability: the
//! controller and the HTTP facade depend on this trait, never on a concrete
//! HTTP client. Hosts and tests plug in their own implementations.

use crate::{
    error::AppResult,
    models::{Category, SearchPage},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for metadata search providers
///
/// One call searches one content category and returns the provider-shaped
/// result page; normalization into the unified model happens in the caller.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search titles in one category, first page only
    async fn search(&self, query: &str, category: Category) -> AppResult<SearchPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
