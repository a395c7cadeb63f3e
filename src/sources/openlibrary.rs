//! Open Library catalog source.
//!
//! Uses the Open Library search API (https://openlibrary.org/search.json).
//! Open Library exposes no direct download identifier, so this source is
//! search-only.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Book, BookBuilder, SearchQuery, SearchResponse, SourceType};
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::HttpClient;

const OPENLIBRARY_API_BASE: &str = "https://openlibrary.org";

/// Open Library catalog source
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: HttpClient,
    api_base: String,
}

impl OpenLibrarySource {
    /// Create a source talking to the public endpoint
    pub fn new(client: HttpClient) -> Self {
        Self::with_api_base(client, OPENLIBRARY_API_BASE)
    }

    /// Create a source with a custom endpoint (used by tests against a mock server)
    pub fn with_api_base(client: HttpClient, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn parse_result(&self, doc: OpenLibraryDoc) -> Book {
        let book_id = doc.key.trim_start_matches("/works/").to_string();
        let url = format!("{}{}", self.api_base, doc.key);
        let authors = doc.author_name.unwrap_or_default().join("; ");

        let mut builder = BookBuilder::new(book_id, doc.title, url, SourceType::OpenLibrary)
            .authors(authors);

        if let Some(year) = doc.first_publish_year {
            builder = builder.first_publish_year(year);
        }

        builder.build()
    }
}

#[async_trait]
impl Source for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        if !query.has_terms() {
            return Err(SourceError::InvalidRequest(
                "search requires a title or an author".to_string(),
            ));
        }

        let mut params = Vec::new();
        if let Some(title) = &query.title {
            params.push(format!(
                "title={}",
                urlencoding::encode(&title.to_lowercase())
            ));
        }
        if let Some(author) = &query.author {
            params.push(format!(
                "author={}",
                urlencoding::encode(&author.to_lowercase())
            ));
        }

        let url = format!("{}/search.json?{}", self.api_base, params.join("&"));

        tracing::debug!(%url, "searching Open Library");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Open Library: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Open Library API returned status: {}",
                response.status()
            )));
        }

        let data: OpenLibraryResponse = response.json().await.map_err(|e| {
            SourceError::Parse(format!("Failed to parse Open Library response: {}", e))
        })?;

        let total = data.num_found;
        let books: Vec<Book> = data
            .docs
            .into_iter()
            .take(query.max_results)
            .map(|d| self.parse_result(d))
            .collect();

        Ok(SearchResponse::new(books, self.name(), query.describe()).total_results(total))
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct OpenLibraryResponse {
    #[serde(rename = "numFound")]
    num_found: usize,
    docs: Vec<OpenLibraryDoc>,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryDoc {
    key: String,
    title: String,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_for(server: &mockito::ServerGuard) -> OpenLibrarySource {
        OpenLibrarySource::with_api_base(HttpClient::new(), server.url())
    }

    const SEARCH_BODY: &str = r#"{
        "numFound": 3,
        "docs": [
            {
                "key": "/works/OL66554W",
                "title": "Pride and Prejudice",
                "author_name": ["Jane Austen"],
                "first_publish_year": 1813
            },
            {
                "key": "/works/OL14991W",
                "title": "Pride and Prejudice and Zombies"
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_search_maps_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("title".into(), "pride and prejudice".into()),
                mockito::Matcher::UrlEncoded("author".into(), "austen".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(SEARCH_BODY)
            .create_async()
            .await;

        let source = source_for(&server);
        let query = SearchQuery::new()
            .title("Pride and Prejudice")
            .author("Austen");
        let response = source.search(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.total_results, Some(3));
        assert_eq!(response.books.len(), 2);

        let first = &response.books[0];
        assert_eq!(first.book_id, "OL66554W");
        assert_eq!(first.authors, "Jane Austen");
        assert_eq!(first.first_publish_year, Some(1813));
        assert_eq!(first.source, SourceType::OpenLibrary);
        assert!(!first.has_epub());

        // Missing optional fields stay empty
        let second = &response.books[1];
        assert!(second.authors.is_empty());
        assert!(second.first_publish_year.is_none());
    }

    #[tokio::test]
    async fn test_search_title_only_omits_author_param() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::UrlEncoded(
                "title".into(),
                "dracula".into(),
            ))
            .with_body(r#"{"numFound": 0, "docs": []}"#)
            .create_async()
            .await;

        let source = source_for(&server);
        let response = source
            .search(&SearchQuery::new().title("Dracula"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.books.is_empty());
    }

    #[tokio::test]
    async fn test_search_zero_matches_is_ok() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"numFound": 0, "docs": []}"#)
            .create_async()
            .await;

        let source = source_for(&server);
        let response = source
            .search(&SearchQuery::new().author("nobody"))
            .await
            .unwrap();

        assert!(response.books.is_empty());
        assert_eq!(response.total_results, Some(0));
    }

    #[tokio::test]
    async fn test_search_without_terms_is_rejected() {
        let server = mockito::Server::new_async().await;
        let source = source_for(&server);

        let err = source.search(&SearchQuery::new()).await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_search_doc_without_title_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"numFound": 1, "docs": [{"key": "/works/OL1W"}]}"#)
            .create_async()
            .await;

        let source = source_for(&server);
        let err = source
            .search(&SearchQuery::new().title("pride"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_download_not_supported() {
        let source = OpenLibrarySource::new(HttpClient::new());
        assert!(!source.supports_download());

        let request = crate::models::DownloadRequest::new("OL66554W", "downloads");
        let err = source.download(&request).await.unwrap_err();
        assert!(matches!(err, SourceError::NotImplemented));
    }
}
