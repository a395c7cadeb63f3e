//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{Book, SearchQuery, SearchResponse, SourceType};
use crate::sources::{Source, SourceCapabilities, SourceError};

/// A mock source for testing that returns a predefined response or failure.
#[derive(Debug, Default)]
pub struct MockSource {
    id: String,
    search_response: Mutex<Option<SearchResponse>>,
    search_error: Mutex<Option<String>>,
}

impl MockSource {
    /// Create a new mock source with the id "mock".
    pub fn new() -> Self {
        Self::with_id("mock")
    }

    /// Create a new mock source with a custom id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            search_response: Mutex::new(None),
            search_error: Mutex::new(None),
        }
    }

    /// Set the search response to return.
    pub fn set_search_response(&self, response: SearchResponse) {
        let mut guard = self.search_response.lock().unwrap();
        *guard = Some(response);
    }

    /// Make the next searches fail with a network error carrying `message`.
    pub fn set_search_error(&self, message: impl Into<String>) {
        let mut guard = self.search_error.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Clear any configured response or error.
    pub fn clear(&self) {
        *self.search_response.lock().unwrap() = None;
        *self.search_error.lock().unwrap() = None;
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        if let Some(message) = &*self.search_error.lock().unwrap() {
            return Err(SourceError::Network(message.clone()));
        }

        let guard = self.search_response.lock().unwrap();
        match &*guard {
            Some(response) => Ok(response.clone()),
            None => Ok(SearchResponse::new(
                Vec::new(),
                "Mock Source",
                query.describe(),
            )),
        }
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(book_id: &str, title: &str, source_type: SourceType) -> Book {
    Book::new(
        book_id.to_string(),
        title.to_string(),
        format!("http://example.com/{}", book_id),
        source_type,
    )
}
