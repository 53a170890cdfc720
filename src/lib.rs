//! modmeta - read, cache and update module metadata JSON files
//!
//! Each module in a module-managed codebase ships a small JSON file
//! (name, version, enabled flag, dependency lists). modmeta wraps those
//! files in a typed accessor: decode once, read and mutate the attribute
//! map in memory, write it back pretty-printed. Loads can optionally go
//! through a TTL cache with selectable memory or file backing.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

pub use crate::cache::store::{Cache, FileCache, MemoryCache};
pub use crate::config::{CacheConfig, CacheDriver};
pub use crate::core::document::{Attributes, JsonDocument};
pub use crate::core::error::DocumentError;
pub use crate::core::loader::DocumentLoader;
