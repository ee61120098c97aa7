//! Denormalization: canonical flat document back to the application shape
//!
//! The flat document is re-nested along delimiter boundaries and walked
//! against the target's [`FieldIndex`]. Declared fields are coerced to their
//! type and renamed to their external tag, structure fields recurse with
//! their own index, and `{"raw": v}` wrappers from search results are
//! unwrapped where a scalar is declared. Undeclared fields pass through
//! under their canonical name.

use crate::coerce::coerce;
use crate::descriptor::TypeDescriptor;
use crate::index::{FieldIndex, IndexedField};
use flatdoc_core::{structure, Error, FlatDocument, Map, Result, Value, DEFAULT_DELIMITER};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Key of the store's search result envelope
pub const RAW_KEY: &str = "raw";

/// Inverse transform configured with the store's path delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denormalizer {
    delimiter: char,
}

impl Default for Denormalizer {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Denormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Denormalize against a descriptor, building its index for this call
    pub fn denormalize(&self, flat: FlatDocument, descriptor: &TypeDescriptor) -> Result<Value> {
        let index = FieldIndex::build_with(descriptor, self.delimiter)?;
        self.denormalize_with_index(flat, &index).map(Value::Map)
    }

    /// Denormalize against a prebuilt index
    pub fn denormalize_with_index(&self, flat: FlatDocument, index: &FieldIndex) -> Result<Map> {
        let fields = flat.len();
        let nested = structure(flat, self.delimiter);
        let denormalized = self.walk(nested, index)?;

        debug!(
            structure = index.name(),
            fields,
            keys = denormalized.len(),
            "denormalized document"
        );
        Ok(denormalized)
    }

    fn walk(&self, nested: Map, index: &FieldIndex) -> Result<Map> {
        let mut denormalized = Map::new();
        let mut pending: VecDeque<(String, Value)> = nested.into_iter().collect();

        while let Some((key, value)) = pending.pop_front() {
            let Some(field) = index.get(&key) else {
                match value {
                    // A declared name spanning several segments was split
                    // apart by structuring; rejoin the next segment
                    Value::Map(inner) if index.has_prefix(&key) => {
                        for (segment, child) in inner.into_iter().rev() {
                            pending.push_front((self.join(&key, &segment), child));
                        }
                    }
                    other => {
                        trace!(key = %key, "undeclared field passed through");
                        denormalized.insert(key, other);
                    }
                }
                continue;
            };

            let value = match value {
                Value::Map(inner) if !inner.is_empty() => {
                    let rest = self.split_siblings(&key, inner, index, &mut pending);
                    // Only siblings were nested here; the field itself is absent
                    if rest.is_empty() {
                        continue;
                    }
                    Value::Map(rest)
                }
                other => other,
            };

            let value = self.field_value(&key, value, field)?;
            denormalized.insert(field.external.clone(), value);
        }

        Ok(denormalized)
    }

    /// Hand back children of a declared field that belong to sibling names.
    ///
    /// `user_id` next to a declared `user` structure is nested under `user`
    /// by structuring. Segments that continue into a name or prefix
    /// declared at this level are moved back onto `pending` as joined keys.
    fn split_siblings(
        &self,
        key: &str,
        mut inner: Map,
        index: &FieldIndex,
        pending: &mut VecDeque<(String, Value)>,
    ) -> Map {
        let siblings: Vec<String> = inner
            .keys()
            .filter(|segment| {
                let joined = self.join(key, segment);
                index.get(&joined).is_some() || index.has_prefix(&joined)
            })
            .cloned()
            .collect();

        for segment in siblings.into_iter().rev() {
            if let Some(child) = inner.remove(&segment) {
                pending.push_front((self.join(key, &segment), child));
            }
        }
        inner
    }

    fn join(&self, prefix: &str, segment: &str) -> String {
        format!("{}{}{}", prefix, self.delimiter, segment)
    }

    fn field_value(&self, key: &str, value: Value, field: &IndexedField) -> Result<Value> {
        let value = match value {
            Value::Map(inner) => {
                if let Some(nested_index) = &field.nested {
                    return self.walk(inner, nested_index).map(Value::Map);
                }
                if field.descriptor.is_dynamic() {
                    unwrap_raw_if_wrapped(inner)
                } else {
                    unwrap_raw(key, inner)?
                }
            }
            other => other,
        };

        coerce(key, value, &field.descriptor)
    }
}

/// Unwrap a `{"raw": v}` envelope where a scalar is declared.
///
/// A nested map without `raw` means the document does not match the
/// declared type; no partial result is produced.
fn unwrap_raw(key: &str, mut inner: Map) -> Result<Value> {
    inner.remove(RAW_KEY).ok_or_else(|| Error::RawUnwrap {
        field: key.to_string(),
    })
}

fn unwrap_raw_if_wrapped(mut inner: Map) -> Value {
    if inner.len() == 1 {
        if let Some(raw) = inner.remove(RAW_KEY) {
            return raw;
        }
    }
    Value::Map(inner)
}

/// Denormalize with the default `_` delimiter
pub fn denormalize(flat: FlatDocument, descriptor: &TypeDescriptor) -> Result<Value> {
    Denormalizer::default().denormalize(flat, descriptor)
}
