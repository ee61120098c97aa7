//! Normalization: nested application document to canonical flat document
//!
//! The document is flattened, every raw key is canonicalized and matched
//! against the schema:
//!
//! 1. An exact match is stored as is. `null` becomes the type's default and
//!    booleans are re-encoded for the declared type.
//! 2. A key whose first segment matches is a localized variant. All strings
//!    under that base key are aggregated into one list,
//!    e.g. `meanings.az.value: [a, b]` and `meanings.ru.value: [c]` become
//!    `meanings: [a, b, c]`.
//! 3. Anything else is dropped.

use crate::schema::{SchemaDefinition, SchemaType};
use ahash::AHashSet;
use flatdoc_core::{
    base_key, flatten, normalize_key_with, Error, FlatDocument, Result, Value, DEFAULT_DELIMITER,
};
use tracing::{debug, trace};

/// Forward transform configured with the store's path delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    delimiter: char,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Normalize a nested document into a canonical flat document.
    ///
    /// Fails when the document cannot be flattened or when a boolean lands
    /// on a field whose type has no boolean encoding.
    pub fn normalize(&self, document: Value, schema: &SchemaDefinition) -> Result<FlatDocument> {
        let entries = flatten(document, self.delimiter)?;
        let total = entries.len();

        let mut normalized = FlatDocument::new();
        let mut aggregated: AHashSet<String> = AHashSet::new();
        let mut dropped = 0usize;

        for (raw_key, value) in entries {
            let norm_key = normalize_key_with(&raw_key, self.delimiter);

            if let Some(schema_type) = schema.get(&norm_key) {
                let value = encode_exact(&norm_key, value, schema_type)?;
                aggregated.remove(&norm_key);
                normalized.insert(norm_key, value);
                continue;
            }

            let base = base_key(&norm_key, self.delimiter);
            if schema.contains(base) {
                let mut strings = if aggregated.contains(base) {
                    match normalized.remove(base) {
                        Some(Value::List(items)) => items,
                        _ => Vec::new(),
                    }
                } else {
                    Vec::new()
                };
                collect_strings(value, &mut strings);

                let base = base.to_string();
                normalized.insert(base.clone(), Value::List(strings));
                aggregated.insert(base);
                continue;
            }

            trace!(key = %raw_key, "field not in schema, dropped");
            dropped += 1;
        }

        debug!(
            entries = total,
            fields = normalized.len(),
            dropped,
            "normalized document"
        );
        Ok(normalized)
    }

    /// Normalize every document independently
    pub fn normalize_all(
        &self,
        documents: Vec<Value>,
        schema: &SchemaDefinition,
    ) -> Result<Vec<FlatDocument>> {
        documents
            .into_iter()
            .map(|document| self.normalize(document, schema))
            .collect()
    }
}

/// Normalize with the default `_` delimiter
pub fn normalize(document: Value, schema: &SchemaDefinition) -> Result<FlatDocument> {
    Normalizer::default().normalize(document, schema)
}

/// Encode a value stored under an exactly matching schema field
fn encode_exact(field: &str, value: Value, schema_type: SchemaType) -> Result<Value> {
    match value {
        Value::Null => Ok(schema_type.null_default()),
        Value::Bool(b) => encode_bool(field, b, schema_type),
        other => Ok(other),
    }
}

/// The store has no boolean type: text fields take `"true"`/`"false"`,
/// number fields take `1`/`0`.
fn encode_bool(field: &str, value: bool, schema_type: SchemaType) -> Result<Value> {
    match schema_type {
        SchemaType::Text => Ok(Value::Text(value.to_string())),
        SchemaType::Number => Ok(Value::Int(i64::from(value))),
        SchemaType::Date | SchemaType::Geolocation => Err(Error::BoolEncoding {
            field: field.to_string(),
            schema_type: schema_type.to_string(),
        }),
    }
}

/// Strings and string elements of lists. Everything else is dropped.
fn collect_strings(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Text(s) => out.push(Value::Text(s)),
        Value::List(items) => {
            out.extend(items.into_iter().filter(|item| matches!(item, Value::Text(_))))
        }
        _ => {}
    }
}
