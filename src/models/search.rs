//! Search and download request/response models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search query parameters
///
/// A valid query carries at least one of `title`/`author`; sources reject an
/// empty query with `InvalidRequest` and the CLI rejects it before dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Title to search for
    pub title: Option<String>,

    /// Author name to search for
    pub author: Option<String>,

    /// Maximum number of results to return per source
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            max_results: 10,
        }
    }
}

impl SearchQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title term
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author term
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set maximum results per source
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Whether at least one search term is present
    pub fn has_terms(&self) -> bool {
        self.title.is_some() || self.author.is_some()
    }

    /// Human-readable description of the query, used in responses and logs
    pub fn describe(&self) -> String {
        match (&self.title, &self.author) {
            (Some(t), Some(a)) => format!("title \"{}\" by \"{}\"", t, a),
            (Some(t), None) => format!("title \"{}\"", t),
            (None, Some(a)) => format!("author \"{}\"", a),
            (None, None) => String::from("(empty)"),
        }
    }
}

/// Search response containing books and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Books found
    pub books: Vec<crate::models::Book>,

    /// Total number of results (may be more than returned)
    pub total_results: Option<usize>,

    /// Source of the results
    pub source: String,

    /// Query that was executed
    pub query: String,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(
        books: Vec<crate::models::Book>,
        source: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            books,
            total_results: None,
            source: source.into(),
            query: query.into(),
        }
    }

    /// Set total results
    pub fn total_results(mut self, total: usize) -> Self {
        self.total_results = Some(total);
        self
    }
}

/// Request for downloading a book's EPUB
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Book ID (numeric Gutenberg id)
    pub book_id: String,

    /// Directory where the EPUB is saved, created if absent
    pub output_dir: PathBuf,
}

impl DownloadRequest {
    /// Create a new download request
    pub fn new(book_id: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            book_id: book_id.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Result of a download operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResult {
    /// Path where the file was saved
    pub path: String,

    /// Number of bytes downloaded
    pub bytes: u64,
}
