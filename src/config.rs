//! Cache configuration
//!
//! The three externally-sourced settings the accessor consumes: whether the
//! read cache is on, which driver backs it, and how long entries live.
//! Sourced by the caller (CLI flags, env, or an embedding application);
//! nothing here reads configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default entry lifetime (one minute)
pub const DEFAULT_CACHE_LIFETIME_MS: u64 = 60_000;

/// Default directory for the file driver
pub const DEFAULT_CACHE_DIR: &str = ".modmeta";

/// Selectable cache backing driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheDriver {
    /// In-process map; entries live for the process lifetime at most
    #[default]
    Memory,
    /// One entry file per key under the cache directory
    File,
}

impl std::str::FromStr for CacheDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(CacheDriver::Memory),
            "file" => Ok(CacheDriver::File),
            _ => Err(format!("Unknown cache driver: {}", s)),
        }
    }
}

impl CacheDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheDriver::Memory => "memory",
            CacheDriver::File => "file",
        }
    }
}

/// Cache policy for document loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether loads go through the cache at all
    #[serde(default)]
    pub enabled: bool,

    /// Backing driver for cached entries
    #[serde(default)]
    pub driver: CacheDriver,

    /// Entry lifetime in milliseconds
    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: u64,

    /// Directory for the file driver (defaults to `.modmeta`)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_lifetime_ms() -> u64 {
    DEFAULT_CACHE_LIFETIME_MS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            driver: CacheDriver::Memory,
            lifetime_ms: DEFAULT_CACHE_LIFETIME_MS,
            dir: None,
        }
    }
}

impl CacheConfig {
    /// Caching off; every load decodes the file
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Caching on with the given driver and lifetime
    pub fn enabled(driver: CacheDriver, lifetime_ms: u64) -> Self {
        Self {
            enabled: true,
            driver,
            lifetime_ms,
            dir: None,
        }
    }

    /// Set the cache directory for the file driver
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// The effective cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
    }

    /// Entry lifetime as a duration
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled_memory() {
        let config = CacheConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.driver, CacheDriver::Memory);
        assert_eq!(config.lifetime_ms, DEFAULT_CACHE_LIFETIME_MS);
    }

    #[test]
    fn test_driver_from_str() {
        assert_eq!("memory".parse::<CacheDriver>(), Ok(CacheDriver::Memory));
        assert_eq!("mem".parse::<CacheDriver>(), Ok(CacheDriver::Memory));
        assert_eq!("FILE".parse::<CacheDriver>(), Ok(CacheDriver::File));
        assert!("redis".parse::<CacheDriver>().is_err());
    }

    #[test]
    fn test_cache_dir_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.cache_dir(), PathBuf::from(DEFAULT_CACHE_DIR));

        let config = CacheConfig::default().with_dir("/tmp/cache");
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/cache"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"enabled":true,"driver":"file"}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.driver, CacheDriver::File);
        assert_eq!(config.lifetime_ms, DEFAULT_CACHE_LIFETIME_MS);
    }
}
