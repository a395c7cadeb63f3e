//! # book-finder
//!
//! Search public-domain book catalogs and download EPUBs from Project
//! Gutenberg.
//!
//! ## Architecture
//!
//! The library is organized into three modules:
//!
//! - [`models`]: Core data structures (Book, SearchQuery, etc.)
//! - [`sources`]: Catalog source plugins with a trait-based architecture
//! - [`utils`]: HTTP client and result rendering

pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::Book;
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
