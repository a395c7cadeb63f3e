//! Plain-text rendering of search results.

use crate::models::SearchResponse;
use std::fmt::Write;

/// Render one source's results as plain text.
///
/// Layout: a header with the source name and total count, a separator, then
/// a numbered entry per book with title, authors, identifier, and the
/// year or EPUB availability when the catalog reports them.
pub fn format_search_results(response: &SearchResponse) -> String {
    let mut out = String::new();

    if response.books.is_empty() {
        let _ = writeln!(out, "No books found on {}", response.source);
        return out;
    }

    let total = response.total_results.unwrap_or(response.books.len());
    let _ = writeln!(out, "\n{} Results ({} found):", response.source, total);
    let _ = writeln!(out, "{}", "-".repeat(50));

    for (i, book) in response.books.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, book.title);
        if !book.authors.is_empty() {
            let _ = writeln!(out, "   Author(s): {}", book.authors);
        }
        let _ = writeln!(out, "   ID: {}", book.book_id);
        if let Some(year) = book.first_publish_year {
            let _ = writeln!(out, "   First published: {}", year);
        }
        if book.source == crate::models::SourceType::Gutenberg {
            let available = if book.has_epub() { "Yes" } else { "No" };
            let _ = writeln!(out, "   EPUB available: {}", available);
        }
        let _ = writeln!(out);
    }

    out
}
