//! Book model representing a catalog entry from any source.

use serde::{Deserialize, Serialize};

/// The catalog where the book was found
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Gutenberg,
    OpenLibrary,
    #[serde(untagged)]
    Other(String),
}

impl SourceType {
    /// Returns the display name of the source
    pub fn name(&self) -> &str {
        match self {
            SourceType::Gutenberg => "Project Gutenberg",
            SourceType::OpenLibrary => "Open Library",
            SourceType::Other(s) => s,
        }
    }

    /// Returns the source identifier (used on the CLI and in the registry)
    pub fn id(&self) -> &str {
        match self {
            SourceType::Gutenberg => "gutenberg",
            SourceType::OpenLibrary => "openlibrary",
            SourceType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A book from any catalog source
///
/// This struct provides a standardized format for entries across all
/// sources, so results from multiple catalogs can be merged and printed
/// uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Source-specific identifier (numeric Gutenberg id, Open Library work key)
    pub book_id: String,

    /// Book title
    pub title: String,

    /// Authors (semicolon-separated)
    pub authors: String,

    /// Catalog page URL
    pub url: String,

    /// Direct EPUB URL, when the catalog exposes one
    pub epub_url: Option<String>,

    /// Year of first publication, when known
    pub first_publish_year: Option<u32>,

    /// Download count reported by the catalog
    pub download_count: Option<u64>,

    /// Source where the book was found
    pub source: SourceType,
}

impl Book {
    /// Create a new book with required fields
    pub fn new(book_id: String, title: String, url: String, source: SourceType) -> Self {
        Self {
            book_id,
            title,
            authors: String::new(),
            url,
            epub_url: None,
            first_publish_year: None,
            download_count: None,
            source,
        }
    }

    /// Returns the author names as a vector
    pub fn author_list(&self) -> Vec<&str> {
        self.authors
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Check if the book has a downloadable EPUB
    pub fn has_epub(&self) -> bool {
        self.epub_url.is_some()
    }
}

/// Builder for constructing Book objects
#[derive(Debug, Clone)]
pub struct BookBuilder {
    book: Book,
}

impl BookBuilder {
    /// Create a new builder with required fields
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        source: SourceType,
    ) -> Self {
        Self {
            book: Book::new(book_id.into(), title.into(), url.into(), source),
        }
    }

    /// Set authors
    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.book.authors = authors.into();
        self
    }

    /// Set EPUB URL
    pub fn epub_url(mut self, url: impl Into<String>) -> Self {
        self.book.epub_url = Some(url.into());
        self
    }

    /// Set year of first publication
    pub fn first_publish_year(mut self, year: u32) -> Self {
        self.book.first_publish_year = Some(year);
        self
    }

    /// Set download count
    pub fn download_count(mut self, count: u64) -> Self {
        self.book.download_count = Some(count);
        self
    }

    /// Build the Book
    pub fn build(self) -> Book {
        self.book
    }
}
