//! Cache module - remember-style storage for decoded documents
//!
//! Provides:
//! - The Cache trait (get-or-compute-and-store, keyed by document path)
//! - Memory and file drivers
//! - Cache entry metadata with TTL expiry

pub mod entry;
pub mod store;
