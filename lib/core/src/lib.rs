//! # flatdoc Core
//!
//! Value model and path transforms shared by the normalizer and the
//! denormalizer.
//!
//! This crate provides:
//!
//! - [`Value`] - Closed dynamic value used for every document at the boundary
//! - [`FlatDocument`] - Canonical single-level document as stored
//! - [`normalize_key`] - Key canonicalization (collapse, trim, lowercase)
//! - [`flatten`] - Nested document to delimiter-joined flat entries
//! - [`structure`] - Flat entries back to a nested map
//!
//! ## Example
//!
//! ```rust
//! use flatdoc_core::{flatten, normalize_key, structure, Value};
//! use serde_json::json;
//!
//! let doc = Value::from(json!({"author": {"_Name": "Ada"}}));
//! let entries = flatten(doc, '_').unwrap();
//! assert_eq!(entries[0].0, "author__Name");
//! assert_eq!(normalize_key(&entries[0].0), "author_name");
//!
//! let nested = structure(vec![("author_name".to_string(), Value::from("Ada"))], '_');
//! assert_eq!(Value::Map(nested), Value::from(json!({"author": {"name": "Ada"}})));
//! ```

pub mod document;
pub mod error;
pub mod flatten;
pub mod key;
pub mod structure;
pub mod value;

pub use document::FlatDocument;
pub use error::{Error, Result};
pub use flatten::{flatten, FlatEntries, MAX_DEPTH};
pub use key::{base_key, normalize_key, normalize_key_with, DEFAULT_DELIMITER};
pub use structure::structure;
pub use value::{Map, Value};
