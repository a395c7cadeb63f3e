//! Registry for managing catalog source plugins.

use std::collections::HashMap;
use std::sync::Arc;

use super::{GutenbergSource, OpenLibrarySource, Source, SourceError};
use crate::utils::HttpClient;

bitflags::bitflags! {
    /// Capabilities that a source can support
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceCapabilities: u32 {
        const SEARCH = 1 << 0;
        const DOWNLOAD = 1 << 1;
        const ID_LOOKUP = 1 << 2;
    }
}

/// Registry for all available catalog sources
///
/// The SourceRegistry manages the source plugins and provides methods to
/// query and use them. Lookup is by source id; callers that need a
/// deterministic ordering across sources pass an explicit id list.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create a new registry with all available sources sharing one client
    pub fn new(client: HttpClient) -> Self {
        let mut registry = Self {
            sources: HashMap::new(),
        };

        registry.register(Arc::new(GutenbergSource::new(client.clone())));
        registry.register(Arc::new(OpenLibrarySource::new(client)));

        registry
    }

    /// Register a new source
    pub fn register(&mut self, source: Arc<dyn Source>) {
        self.sources.insert(source.id().to_string(), source);
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.get(id)
    }

    /// Get a source by ID, returning an error if not found
    pub fn get_required(&self, id: &str) -> Result<&Arc<dyn Source>, SourceError> {
        self.get(id)
            .ok_or_else(|| SourceError::NotFound(format!("Source '{}' not found", id)))
    }

    /// Get all registered sources
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.values()
    }

    /// Get all source IDs
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|s| s.as_str())
    }

    /// Get sources that support a specific capability
    pub fn with_capability(&self, capability: SourceCapabilities) -> Vec<&Arc<dyn Source>> {
        self.all()
            .filter(|s| s.capabilities().contains(capability))
            .collect()
    }

    /// Get sources that support search
    pub fn searchable(&self) -> Vec<&Arc<dyn Source>> {
        self.with_capability(SourceCapabilities::SEARCH)
    }

    /// Get sources that support download
    pub fn downloadable(&self) -> Vec<&Arc<dyn Source>> {
        self.with_capability(SourceCapabilities::DOWNLOAD)
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Get the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(HttpClient::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_basic() {
        let registry = SourceRegistry::default();

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_get_source() {
        let registry = SourceRegistry::default();

        let gutenberg = registry.get("gutenberg");
        assert!(gutenberg.is_some());
        assert_eq!(gutenberg.unwrap().id(), "gutenberg");

        let missing = registry.get("nonexistent");
        assert!(missing.is_none());
    }

    #[test]
    fn test_get_required_missing() {
        let registry = SourceRegistry::default();
        let err = registry.get_required("nonexistent").unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_capabilities() {
        let registry = SourceRegistry::default();

        // Gutenberg supports search, download, and id lookup
        let gutenberg = registry.get("gutenberg").unwrap();
        assert!(gutenberg.supports_search());
        assert!(gutenberg.supports_download());
        assert!(gutenberg.supports_id_lookup());

        // Open Library is search-only
        let openlibrary = registry.get("openlibrary").unwrap();
        assert!(openlibrary.supports_search());
        assert!(!openlibrary.supports_download());
        assert!(!openlibrary.supports_id_lookup());
    }

    #[test]
    fn test_downloadable_sources() {
        let registry = SourceRegistry::default();

        let downloadable = registry.downloadable();
        assert_eq!(downloadable.len(), 1);
        assert_eq!(downloadable[0].id(), "gutenberg");
    }
}
