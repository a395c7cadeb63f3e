//! Core data models shared across catalog sources.

mod book;
mod search;

pub use book::{Book, BookBuilder, SourceType};
pub use search::{DownloadRequest, DownloadResult, SearchQuery, SearchResponse};
