//! # flatdoc Schema
//!
//! Schema-driven normalization of application documents for a document
//! store that only knows four field types and flattens nested keys.
//!
//! ## Overview
//!
//! The store schema declares `text`, `date`, `number` or `geolocation` per
//! canonical field name. Normalization maps an arbitrary nested document
//! onto it:
//!
//! - keys are flattened with `_` and canonicalized (`_fooBar` → `foobar`)
//! - `null` becomes the declared type's default
//! - booleans become `"true"`/`"false"` on text fields and `1`/`0` on
//!   number fields
//! - per-locale variants under a declared base key are merged into one
//!   string list
//! - everything the schema does not declare is dropped
//!
//! ## Example
//!
//! ```rust
//! use flatdoc_schema::{normalize, SchemaDefinition, SchemaType};
//! use flatdoc_core::Value;
//! use serde_json::json;
//!
//! let schema = SchemaDefinition::new()
//!     .with_field("title", SchemaType::Text)
//!     .with_field("published", SchemaType::Number);
//!
//! let doc = Value::from(json!({
//!     "Title": {"en": "Hello", "fr": "Bonjour"},
//!     "published": true,
//!     "internal": "dropped"
//! }));
//!
//! let flat = normalize(doc, &schema).unwrap();
//! assert_eq!(flat.get("published"), Some(&Value::Int(1)));
//! assert_eq!(flat.get("title").and_then(|v| v.as_list()).map(|l| l.len()), Some(2));
//! assert!(!flat.contains_key("internal"));
//! ```

pub mod marshal;
pub mod normalize;
pub mod schema;

// Re-export main types
pub use marshal::{marshal, to_flat};
pub use normalize::{normalize, Normalizer};
pub use schema::{SchemaDefinition, SchemaType, ID_FIELD, ZERO_GEOLOCATION, ZERO_TIMESTAMP};
