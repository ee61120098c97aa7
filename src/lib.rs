//! # flatdoc
//!
//! Schema-driven normalization and denormalization of nested documents for
//! App Search-like document stores.
//!
//! The store keeps every document flat, with nested keys joined by `_`, and
//! knows four field types: `text`, `date`, `number` and `geolocation`.
//! flatdoc maps arbitrary application documents onto that shape and back:
//!
//! ```text
//!  application document ──normalize──▶ flat document ──▶ store
//!        ▲                  (schema)                        │
//!        └──────── denormalize ◀── flat document ◀──────────┘
//!                   (model)
//! ```
//!
//! ## Quick Start
//!
//! ### As a Library
//!
//! ```rust
//! use flatdoc::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize, PartialEq)]
//! struct Article {
//!     id: String,
//!     #[serde(rename = "publishedYear")]
//!     published_year: u16,
//!     featured: bool,
//! }
//!
//! impl Describe for Article {
//!     fn describe() -> TypeDescriptor {
//!         StructDescriptor::new("Article")
//!             .field::<String>("id")
//!             .tagged::<u16>("published_year", "publishedYear")
//!             .field::<bool>("featured")
//!             .build()
//!     }
//! }
//!
//! impl Unpack for Article {}
//!
//! let schema = SchemaDefinition::new()
//!     .with_field("publishedyear", SchemaType::Number)
//!     .with_field("featured", SchemaType::Text);
//!
//! let article = Article { id: "a-1".into(), published_year: 2021, featured: true };
//! let body = marshal(&article, &schema).unwrap();
//! assert_eq!(body, br#"{"featured":"true","id":"a-1","publishedyear":2021}"#);
//!
//! let back: Article = unmarshal(&body).unwrap();
//! assert_eq!(back, article);
//! ```
//!
//! ### As a CLI
//!
//! ```bash
//! flatdoc normalize --schema schema.json document.json
//! flatdoc denormalize --model model.json flat.json
//! flatdoc key _fooBar__baz
//! ```
//!
//! ## Crate Structure
//!
//! - [`flatdoc-core`](https://docs.rs/flatdoc-core) - Value model, key canonicalization,
//!   flattening and structuring
//! - [`flatdoc-schema`](https://docs.rs/flatdoc-schema) - Store schema and the forward transform
//! - [`flatdoc-model`](https://docs.rs/flatdoc-model) - Type descriptions, field indexes and
//!   the inverse transform

// Re-export core types
pub use flatdoc_core::{
    base_key, flatten, normalize_key, normalize_key_with, structure, Error, FlatDocument, Map,
    Result, Value, DEFAULT_DELIMITER,
};

/// Canonical form of a field name with the default `_` delimiter
pub use flatdoc_core::normalize_key as normalize_field;

// Re-export schema
pub use flatdoc_schema::{
    marshal, normalize, to_flat, Normalizer, SchemaDefinition, SchemaType, ID_FIELD,
    ZERO_GEOLOCATION, ZERO_TIMESTAMP,
};

// Re-export model
pub use flatdoc_model::{
    denormalize, from_value, from_values, unmarshal, unmarshal_slice, unpack, unpack_slice,
    Denormalizer, Describe, FieldDescriptor, FieldIndex, IndexCache, StructDescriptor,
    TypeDescriptor, Unpack, RAW_KEY,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        denormalize, marshal, normalize, to_flat, unmarshal, unmarshal_slice, unpack,
        unpack_slice, Denormalizer, Describe, Error, FlatDocument, Normalizer, Result,
        SchemaDefinition, SchemaType, StructDescriptor, TypeDescriptor, Unpack, Value,
    };
}
