//! Cache entry metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::document::Attributes;

/// A cached decode result with its storage time and lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The key the value was stored under (the document path)
    pub key: String,

    /// When the entry was stored
    pub stored_at: DateTime<Utc>,

    /// Lifetime in milliseconds; an entry at or past its lifetime is stale
    pub ttl_ms: i64,

    /// The cached attribute map
    pub value: Attributes,
}

impl CacheEntry {
    pub fn new(key: &str, ttl: Duration, value: Attributes) -> Self {
        Self {
            key: key.to_string(),
            stored_at: Utc::now(),
            ttl_ms: ttl.as_millis() as i64,
            value,
        }
    }

    /// Whether the entry's lifetime has elapsed.
    ///
    /// A zero lifetime expires immediately, which makes `remember` decode
    /// on every call.
    pub fn is_expired(&self) -> bool {
        let age = Utc::now().signed_duration_since(self.stored_at);
        age.num_milliseconds() >= self.ttl_ms
    }
}
