//! # flatdoc Model
//!
//! Typed application models for flatdoc.
//!
//! Rust has no runtime reflection, so every target type describes its shape
//! through [`Describe`]: scalar kinds, lists, maps, and structures with
//! named, optionally tagged fields. From that description a [`FieldIndex`]
//! is built once per type and cached, and the [`Denormalizer`] uses it to
//! turn canonical flat documents back into the type's serde shape.
//!
//! ## Example
//!
//! ```rust
//! use flatdoc_core::{FlatDocument, Value};
//! use flatdoc_model::{unpack, Describe, StructDescriptor, TypeDescriptor, Unpack};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct Book {
//!     title: String,
//!     #[serde(rename = "inStock")]
//!     in_stock: bool,
//!     pages: u32,
//! }
//!
//! impl Describe for Book {
//!     fn describe() -> TypeDescriptor {
//!         StructDescriptor::new("Book")
//!             .field::<String>("title")
//!             .tagged::<bool>("in_stock", "inStock")
//!             .field::<u32>("pages")
//!             .build()
//!     }
//! }
//!
//! impl Unpack for Book {}
//!
//! let flat = FlatDocument::try_from(Value::from(json!({
//!     "title": {"raw": "Dune"},
//!     "instock": "1",
//!     "pages": "412"
//! })))
//! .unwrap();
//!
//! let book: Book = unpack(flat).unwrap();
//! assert_eq!(book, Book { title: "Dune".into(), in_stock: true, pages: 412 });
//! ```

pub mod coerce;
pub mod denormalize;
pub mod descriptor;
pub mod index;
pub mod unmarshal;

pub use coerce::coerce;
pub use denormalize::{denormalize, Denormalizer, RAW_KEY};
pub use descriptor::{
    Describe, FieldDescriptor, FloatKind, IntKind, StructDescriptor, TypeDescriptor, SKIP_TAG,
};
pub use index::{FieldIndex, IndexCache, IndexedField};
pub use unmarshal::{
    from_value, from_values, unmarshal, unmarshal_slice, unpack, unpack_slice, Unpack,
};
