//! Project Gutenberg catalog source.
//!
//! Search and id lookup go through the Gutendex JSON API
//! (https://gutendex.com); EPUB downloads go straight to the
//! gutenberg.org file server using the book's numeric id.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::io::AsyncWriteExt;

use crate::models::{
    Book, BookBuilder, DownloadRequest, DownloadResult, SearchQuery, SearchResponse, SourceType,
};
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::HttpClient;

const GUTENDEX_API_BASE: &str = "https://gutendex.com";
const GUTENBERG_FILES_BASE: &str = "https://www.gutenberg.org";

const EPUB_MIME: &str = "application/epub+zip";

/// Project Gutenberg catalog source
///
/// Uses the Gutendex API for search and metadata; downloads fetch
/// `/ebooks/{id}.epub.noimages` from the Gutenberg file server.
#[derive(Debug, Clone)]
pub struct GutenbergSource {
    client: HttpClient,
    api_base: String,
    files_base: String,
}

impl GutenbergSource {
    /// Create a source talking to the public endpoints
    pub fn new(client: HttpClient) -> Self {
        Self::with_endpoints(client, GUTENDEX_API_BASE, GUTENBERG_FILES_BASE)
    }

    /// Create a source with custom endpoints (used by tests against a mock server)
    pub fn with_endpoints(
        client: HttpClient,
        api_base: impl Into<String>,
        files_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            files_base: files_base.into(),
        }
    }

    fn parse_result(&self, book: GutendexBook) -> Book {
        let authors: String = book
            .authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        let url = format!("{}/ebooks/{}", self.files_base, book.id);

        let mut builder = BookBuilder::new(book.id.to_string(), book.title, url, SourceType::Gutenberg)
            .authors(authors);

        if let Some(epub_url) = book.formats.get(EPUB_MIME) {
            builder = builder.epub_url(epub_url);
        }
        if let Some(count) = book.download_count {
            builder = builder.download_count(count);
        }

        builder.build()
    }

    /// Lowercased search terms, title and author joined into one phrase.
    ///
    /// Gutendex takes a single `search` parameter matched against both
    /// titles and author names.
    fn search_terms(query: &SearchQuery) -> String {
        [query.title.as_deref(), query.author.as_deref()]
            .iter()
            .flatten()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Source for GutenbergSource {
    fn id(&self) -> &str {
        "gutenberg"
    }

    fn name(&self) -> &str {
        "Project Gutenberg"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH | SourceCapabilities::DOWNLOAD | SourceCapabilities::ID_LOOKUP
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        if !query.has_terms() {
            return Err(SourceError::InvalidRequest(
                "search requires a title or an author".to_string(),
            ));
        }

        let terms = Self::search_terms(query);
        let url = format!(
            "{}/books/?search={}",
            self.api_base,
            urlencoding::encode(&terms)
        );

        tracing::debug!(%url, "searching Gutendex");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Gutendex: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Gutendex API returned status: {}",
                response.status()
            )));
        }

        let data: GutendexResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Gutendex response: {}", e)))?;

        let total = data.count;
        let books: Vec<Book> = data
            .results
            .into_iter()
            .take(query.max_results)
            .map(|b| self.parse_result(b))
            .collect();

        Ok(SearchResponse::new(books, self.name(), query.describe()).total_results(total))
    }

    async fn get_by_id(&self, id: &str) -> Result<Book, SourceError> {
        self.validate_id(id)?;

        let url = format!("{}/books/{}", self.api_base, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch book info: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!(
                "No Gutenberg book with id {}",
                id
            )));
        }
        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Gutendex API returned status: {}",
                response.status()
            )));
        }

        let book: GutendexBook = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Gutendex response: {}", e)))?;

        Ok(self.parse_result(book))
    }

    async fn download(&self, request: &DownloadRequest) -> Result<DownloadResult, SourceError> {
        self.validate_id(&request.book_id)?;

        let url = format!(
            "{}/ebooks/{}.epub.noimages",
            self.files_base, request.book_id
        );

        tracing::debug!(%url, "downloading EPUB");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch EPUB: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!(
                "No EPUB available for id {}",
                request.book_id
            )));
        }
        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Gutenberg file server returned status: {}",
                response.status()
            )));
        }

        tokio::fs::create_dir_all(&request.output_dir).await?;
        let path = request.output_dir.join(format!("{}.epub", request.book_id));
        let mut file = tokio::fs::File::create(&path).await?;

        let mut bytes: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| SourceError::Network(format!("Failed to read body: {}", e)))?;
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(DownloadResult {
            path: path.display().to_string(),
            bytes,
        })
    }

    fn validate_id(&self, id: &str) -> Result<(), SourceError> {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SourceError::InvalidRequest(format!(
                "Gutenberg ids are numeric, got '{}'",
                id
            )));
        }
        Ok(())
    }
}

// ===== Gutendex API Types =====

#[derive(Debug, Deserialize)]
struct GutendexResponse {
    count: usize,
    results: Vec<GutendexBook>,
}

#[derive(Debug, Deserialize)]
struct GutendexBook {
    id: u64,
    title: String,
    #[serde(default)]
    authors: Vec<GutendexAuthor>,
    #[serde(default)]
    formats: HashMap<String, String>,
    download_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GutendexAuthor {
    name: String,
}
