//! Document loader - cache-aware construction of documents
//!
//! The loader owns the cache policy: with caching disabled every load
//! decodes the file, with caching enabled loads go through the driver's
//! `remember` keyed by the document path. The driver is an injected
//! dependency, so embedders can supply their own store.

use std::path::PathBuf;

use crate::cache::store::{self, Cache};
use crate::config::CacheConfig;
use crate::core::document::JsonDocument;
use crate::core::error::DocumentError;

/// Loads documents through the configured cache policy
pub struct DocumentLoader {
    config: CacheConfig,
    cache: Box<dyn Cache>,
}

impl DocumentLoader {
    /// Build a loader with the driver selected by the config
    pub fn new(config: CacheConfig) -> Self {
        let cache = store::from_config(&config);
        Self { config, cache }
    }

    /// Build a loader with an injected cache driver
    pub fn with_cache(config: CacheConfig, cache: Box<dyn Cache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Load the document at `path`.
    ///
    /// With caching enabled, repeated loads of the same path within the
    /// lifetime window return the cached snapshot even if the file changed
    /// on disk in the meantime.
    pub fn load(&self, path: impl Into<PathBuf>) -> Result<JsonDocument, DocumentError> {
        let path = path.into();

        if !self.config.enabled {
            return JsonDocument::open(path);
        }

        let key = path.to_string_lossy().to_string();
        let attributes = self.cache.remember(&key, self.config.lifetime(), &mut || {
            JsonDocument::decode_contents(&path)
        })?;

        Ok(JsonDocument::from_attributes(path, attributes))
    }
}
