//! JSON document accessor
//!
//! A `JsonDocument` wraps a single JSON file on disk: decode once at
//! construction, read and mutate the attribute map in memory, write the
//! whole map back on save. Key order is preserved end to end (serde_json
//! with `preserve_order`).
//!
//! Two deliberately distinct views of the document exist:
//! - `serialized_attributes()` renders the in-memory state
//! - `current_file_text()` re-reads whatever is on disk right now
//!
//! After `set()` without `save()`, the two diverge. That divergence is part
//! of the contract: only a committed save moves the file.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::DocumentError;

/// The decoded attribute map of a document, in key order
pub type Attributes = serde_json::Map<String, Value>;

/// A JSON document backed by a file on disk
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    path: PathBuf,
    attributes: Attributes,
}

impl JsonDocument {
    /// Open a document, decoding the file directly (no cache).
    ///
    /// Fails entirely when the file cannot be read or does not contain a
    /// valid top-level JSON object; a document never exists with partial
    /// or invalid attributes.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        let attributes = Self::decode_contents(&path)?;
        Ok(Self { path, attributes })
    }

    /// Assemble a document from already-decoded attributes.
    ///
    /// Used by the loader when attributes come out of the cache instead of
    /// a fresh decode.
    pub fn from_attributes(path: impl Into<PathBuf>, attributes: Attributes) -> Self {
        Self {
            path: path.into(),
            attributes,
        }
    }

    /// Read and decode the file at `path` into an attribute map.
    ///
    /// Empty content and top-level non-objects (arrays, scalars) are
    /// rejected as invalid documents.
    pub fn decode_contents(path: &Path) -> Result<Attributes, DocumentError> {
        let content = fs::read_to_string(path).map_err(|err| DocumentError::io(path, err))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|err| DocumentError::invalid(path, err.to_string()))?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(DocumentError::invalid(
                path,
                format!("expected a top-level JSON object, got {}", json_type_name(&other)),
            )),
        }
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repoint the document at a different file without reloading attributes
    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// The full in-memory attribute map
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get the value at `key`, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Get the value at `key`, or `default` when the key is absent.
    ///
    /// Never fails for a missing key.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.attributes.get(key).unwrap_or(default)
    }

    /// Whether `key` is present
    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attribute keys in map order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the document has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Set `key` to `value` in memory. Does not touch disk.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Merge `data` into the attributes in memory.
    ///
    /// Keys in `data` override existing keys; everything else is kept.
    /// Does not persist.
    pub fn merge(&mut self, data: Attributes) -> &mut Self {
        for (key, value) in data {
            self.attributes.insert(key, value);
        }
        self
    }

    /// Merge `data` into the attributes and immediately save.
    ///
    /// The only mutation path that auto-persists. Returns `save()`'s
    /// result.
    pub fn update(&mut self, data: Attributes) -> bool {
        self.merge(data);
        self.save()
    }

    /// Pretty-printed JSON of the in-memory attributes
    pub fn serialized_attributes(&self) -> String {
        to_json_pretty(&self.attributes)
    }

    /// Write the serialized attributes to the backing file, replacing its
    /// content entirely.
    ///
    /// Returns `false` instead of an error when the write fails; callers
    /// must check the result. The failure is logged at warn level. No
    /// locking and no atomic rename.
    pub fn save(&self) -> bool {
        match fs::write(&self.path, self.serialized_attributes()) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to write {}: {}", self.path.display(), err);
                false
            }
        }
    }

    /// The raw on-disk content of the backing file, read fresh.
    ///
    /// Does not reflect unsaved in-memory mutations.
    pub fn current_file_text(&self) -> Result<String, DocumentError> {
        fs::read_to_string(&self.path).map_err(|err| DocumentError::io(&self.path, err))
    }
}

/// Render an attribute map as pretty-printed JSON, key order preserved
pub fn to_json_pretty(data: &Attributes) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
