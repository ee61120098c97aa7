//! Unmarshaling of store documents into application types
//!
//! Decoded response bodies are either a single flat object or an array of
//! them. Each object is denormalized against the target's cached
//! [`FieldIndex`] and transcoded into the target through serde.

use crate::denormalize::Denormalizer;
use crate::descriptor::Describe;
use crate::index::IndexCache;
use flatdoc_core::{Error, FlatDocument, Result, Value};
use serde::de::DeserializeOwned;

/// Types that can be rebuilt from a canonical flat document
///
/// The default implementation goes through the generic algorithm. A type
/// may take over by returning `Some` from [`Unpack::unpack_custom`]:
///
/// ```rust
/// use flatdoc_core::{FlatDocument, Result};
/// use flatdoc_model::{Describe, StructDescriptor, TypeDescriptor, Unpack};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Count(usize);
///
/// impl Describe for Count {
///     fn describe() -> TypeDescriptor {
///         StructDescriptor::new("Count").build()
///     }
/// }
///
/// impl Unpack for Count {
///     fn unpack_custom(flat: &FlatDocument) -> Option<Result<Self>> {
///         Some(Ok(Count(flat.len())))
///     }
/// }
/// ```
pub trait Unpack: Describe + DeserializeOwned + 'static {
    /// Custom unpacking hook. `None` falls back to the generic algorithm.
    fn unpack_custom(_flat: &FlatDocument) -> Option<Result<Self>> {
        None
    }
}

impl Denormalizer {
    /// Rebuild a typed value from a flat document
    pub fn unpack<T: Unpack>(&self, flat: FlatDocument) -> Result<T> {
        if let Some(result) = T::unpack_custom(&flat) {
            return result;
        }

        let index = IndexCache::global().get_or_build::<T>(self.delimiter())?;
        let denormalized = self.denormalize_with_index(flat, &index)?;
        Value::Map(denormalized).deserialize_into()
    }

    pub fn unpack_slice<T: Unpack>(&self, documents: Vec<FlatDocument>) -> Result<Vec<T>> {
        documents
            .into_iter()
            .map(|document| self.unpack(document))
            .collect()
    }

    /// Rebuild a typed value from a decoded object
    pub fn from_value<T: Unpack>(&self, value: Value) -> Result<T> {
        match value {
            Value::Map(map) => self.unpack(FlatDocument::from(map)),
            Value::List(_) => Err(Error::InvalidTarget(
                "cannot unpack a list into a single structure, unpack it as a slice".to_string(),
            )),
            other => Err(Error::InvalidTarget(format!(
                "cannot unpack {} into a structure",
                other.kind()
            ))),
        }
    }

    /// Rebuild every element of a decoded array. A single object yields a
    /// one-element vector.
    pub fn from_values<T: Unpack>(&self, value: Value) -> Result<Vec<T>> {
        match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Map(map) => self.unpack(FlatDocument::from(map)),
                    other => Err(Error::InvalidTarget(format!(
                        "cannot unpack list element of kind {} into a structure",
                        other.kind()
                    ))),
                })
                .collect(),
            Value::Map(map) => Ok(vec![self.unpack(FlatDocument::from(map))?]),
            other => Err(Error::InvalidTarget(format!(
                "cannot unpack {} into a list of structures",
                other.kind()
            ))),
        }
    }

    /// Decode a JSON object into a typed value
    pub fn unmarshal<T: Unpack>(&self, data: &[u8]) -> Result<T> {
        self.from_value(Value::from_json_slice(data)?)
    }

    /// Decode a JSON array (or single object) into typed values
    pub fn unmarshal_slice<T: Unpack>(&self, data: &[u8]) -> Result<Vec<T>> {
        self.from_values(Value::from_json_slice(data)?)
    }
}

pub fn unpack<T: Unpack>(flat: FlatDocument) -> Result<T> {
    Denormalizer::default().unpack(flat)
}

pub fn unpack_slice<T: Unpack>(documents: Vec<FlatDocument>) -> Result<Vec<T>> {
    Denormalizer::default().unpack_slice(documents)
}

pub fn from_value<T: Unpack>(value: Value) -> Result<T> {
    Denormalizer::default().from_value(value)
}

pub fn from_values<T: Unpack>(value: Value) -> Result<Vec<T>> {
    Denormalizer::default().from_values(value)
}

pub fn unmarshal<T: Unpack>(data: &[u8]) -> Result<T> {
    Denormalizer::default().unmarshal(data)
}

pub fn unmarshal_slice<T: Unpack>(data: &[u8]) -> Result<Vec<T>> {
    Denormalizer::default().unmarshal_slice(data)
}
