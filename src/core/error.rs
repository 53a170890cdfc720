//! Error model for the document accessor
//!
//! Two failure kinds exist: the backing file is unreadable at the OS level,
//! or its content is not a valid JSON document. Both abort the operation
//! that hit them; nothing is retried and no partial document is ever
//! returned.

use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or decoding a JSON document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The backing file could not be read or its metadata accessed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid JSON object
    #[error("error processing file {path}: {message}")]
    InvalidDocument { path: String, message: String },
}

impl DocumentError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DocumentError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn invalid(path: &Path, message: impl Into<String>) -> Self {
        DocumentError::InvalidDocument {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
