//! Utility modules supporting catalog operations.
//!
//! - [`HttpClient`]: shared HTTP client with timeouts and a user agent
//! - [`format_search_results`]: plain-text rendering of a search response

mod display;
mod http;

pub use display::format_search_results;
pub use http::HttpClient;
