//! Catalog source plugins with a trait-based architecture.
//!
//! This module defines the [`Source`] trait that all catalog sources
//! implement. New catalogs can be added by implementing the trait and
//! registering them with the [`SourceRegistry`].

mod gutenberg;
mod openlibrary;
mod registry;

pub mod mock;

pub use gutenberg::GutenbergSource;
pub use mock::MockSource;
pub use openlibrary::OpenLibrarySource;
pub use registry::{SourceCapabilities, SourceRegistry};

use crate::models::{Book, DownloadRequest, DownloadResult, SearchQuery, SearchResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// The Source trait defines the interface for all catalog source plugins.
///
/// # Implementing a New Source
///
/// 1. Create a struct that implements `Source`
/// 2. Implement the required methods (at minimum `id`, `name`, and `search`)
/// 3. Implement optional methods if the catalog supports them
/// 4. Add the source to `SourceRegistry::new()` or register it dynamically
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "gutenberg", "openlibrary")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Describe the capabilities of this source
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    /// Whether this source supports search
    fn supports_search(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::SEARCH)
    }

    /// Whether this source supports downloading EPUBs
    fn supports_download(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::DOWNLOAD)
    }

    /// Whether this source supports lookup by identifier
    fn supports_id_lookup(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::ID_LOOKUP)
    }

    /// Search for books matching the query
    async fn search(&self, _query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Download a book's EPUB into the request's output directory
    async fn download(&self, _request: &DownloadRequest) -> Result<DownloadResult, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Get a book by its identifier (source-specific)
    async fn get_by_id(&self, _id: &str) -> Result<Book, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Validate that a book ID is correctly formatted for this source
    fn validate_id(&self, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested operation is not implemented for this source
    #[error("Operation not implemented for this source")]
    NotImplemented,

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (malformed or incomplete response body)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Book not found
    #[error("Book not found: {0}")]
    NotFound(String),

    /// API error from the catalog
    #[error("API error: {0}")]
    Api(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// Run a search across sources sequentially, in slice order.
///
/// Returns the responses in the same order as the input slice, together with
/// the failures keyed by source id. A failing source never discards another
/// source's results; callers decide how to surface the failures.
pub async fn search_sources(
    sources: &[Arc<dyn Source>],
    query: &SearchQuery,
) -> (Vec<SearchResponse>, Vec<(String, SourceError)>) {
    let mut responses = Vec::new();
    let mut failures = Vec::new();

    for src in sources {
        match src.search(query).await {
            Ok(response) => {
                tracing::debug!(
                    source = src.id(),
                    count = response.books.len(),
                    "search completed"
                );
                responses.push(response);
            }
            Err(e) => {
                tracing::warn!(source = src.id(), error = %e, "search failed");
                failures.push((src.id().to_string(), e));
            }
        }
    }

    (responses, failures)
}
