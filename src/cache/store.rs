//! Cache store - remember-style drivers for decoded documents
//!
//! The cache is a plain get-or-compute-and-store keyed map: `remember`
//! returns the unexpired value under a key, or runs the compute function
//! and stores its result with the given lifetime. Within the lifetime
//! window callers get a possibly-stale snapshot even if the file changed
//! on disk; expiry is purely time-based, never mtime-based.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::cache::entry::CacheEntry;
use crate::config::{CacheConfig, CacheDriver};
use crate::core::document::Attributes;
use crate::core::error::DocumentError;
use crate::core::util::hash_key;

/// Get-or-compute-and-cache collaborator for document loads.
///
/// Compute failures propagate to the caller and are never cached.
pub trait Cache {
    fn remember(
        &self,
        key: &str,
        ttl: Duration,
        compute: &mut dyn FnMut() -> Result<Attributes, DocumentError>,
    ) -> Result<Attributes, DocumentError>;
}

/// Build the driver selected by the config
pub fn from_config(config: &CacheConfig) -> Box<dyn Cache> {
    match config.driver {
        CacheDriver::Memory => Box::new(MemoryCache::new()),
        CacheDriver::File => Box::new(FileCache::new(config.cache_dir())),
    }
}

/// In-process cache driver
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn remember(
        &self,
        key: &str,
        ttl: Duration,
        compute: &mut dyn FnMut() -> Result<Attributes, DocumentError>,
    ) -> Result<Attributes, DocumentError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(entry) = entries.get(key) {
            if !entry.is_expired() {
                log::debug!("cache hit (memory): {}", key);
                return Ok(entry.value.clone());
            }
        }

        log::debug!("cache miss (memory): {}", key);
        let value = compute()?;
        entries.insert(key.to_string(), CacheEntry::new(key, ttl, value.clone()));
        Ok(value)
    }
}

/// File-backed cache driver; one JSON entry file per key.
///
/// Entry file names are derived from a hash of the key so arbitrary paths
/// make valid file names. Unreadable or corrupt entry files are treated as
/// misses, and write failures degrade to uncached operation.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", hash_key(key)))
    }

    fn read_entry(&self, key: &str) -> Option<CacheEntry> {
        let content = fs::read_to_string(self.entry_path(key)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;
        // Hash collisions and hand-edited files: the stored key must match
        if entry.key == key {
            Some(entry)
        } else {
            None
        }
    }

    fn write_entry(&self, entry: &CacheEntry) {
        if let Err(err) = ensure_cache_dir(&self.dir) {
            log::warn!("cannot create cache dir {}: {}", self.dir.display(), err);
            return;
        }
        let path = self.entry_path(&entry.key);
        match serde_json::to_string(entry) {
            Ok(json) => {
                if let Err(err) = fs::write(&path, json) {
                    log::warn!("cannot write cache entry {}: {}", path.display(), err);
                }
            }
            Err(err) => {
                log::warn!("cannot serialize cache entry for {}: {}", entry.key, err);
            }
        }
    }
}

impl Cache for FileCache {
    fn remember(
        &self,
        key: &str,
        ttl: Duration,
        compute: &mut dyn FnMut() -> Result<Attributes, DocumentError>,
    ) -> Result<Attributes, DocumentError> {
        if let Some(entry) = self.read_entry(key) {
            if !entry.is_expired() {
                log::debug!("cache hit (file): {}", key);
                return Ok(entry.value);
            }
        }

        log::debug!("cache miss (file): {}", key);
        let value = compute()?;
        self.write_entry(&CacheEntry::new(key, ttl, value.clone()));
        Ok(value)
    }
}

/// Ensure the cache directory exists
pub fn ensure_cache_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Remove the cache directory and all entries in it
pub fn clear_cache(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}
