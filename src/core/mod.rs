//! Core module - the document accessor and its collaborators
//!
//! This module provides:
//! - The JSON document accessor (JsonDocument)
//! - Cache-aware document loading (DocumentLoader)
//! - The typed error model (DocumentError)
//! - Common utilities

pub mod document;
pub mod error;
pub mod loader;
pub mod util;
