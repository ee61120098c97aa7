//! Field indexes
//!
//! A [`FieldIndex`] maps the canonical name of every declared field of a
//! structure to its declared type and external tag. Field names go through
//! the same key canonicalization as document keys, so whatever the
//! normalizer matched can be found again here.

use crate::descriptor::{Describe, StructDescriptor, TypeDescriptor};
use ahash::{AHashMap, AHashSet};
use flatdoc_core::{normalize_key_with, Error, Result, DEFAULT_DELIMITER};
use parking_lot::RwLock;
use std::any::TypeId;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Index entry for one declared field
#[derive(Debug, Clone)]
pub struct IndexedField {
    /// Key the field is emitted under after denormalization
    pub external: String,
    /// Declared type
    pub descriptor: TypeDescriptor,
    /// Index of the field's own fields when it is a structure
    pub nested: Option<Arc<FieldIndex>>,
}

/// Canonical name lookup for the fields of one structure
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    name: String,
    fields: AHashMap<String, IndexedField>,
    /// Every proper prefix of a multi-segment canonical name
    prefixes: AHashSet<String>,
}

impl FieldIndex {
    /// Build an index with the default `_` delimiter
    pub fn build(descriptor: &TypeDescriptor) -> Result<Self> {
        Self::build_with(descriptor, DEFAULT_DELIMITER)
    }

    /// Build an index for a structure descriptor.
    ///
    /// Lists, dynamic maps and scalars have no declared fields and fail with
    /// [`Error::InvalidTarget`].
    pub fn build_with(descriptor: &TypeDescriptor, delimiter: char) -> Result<Self> {
        match descriptor {
            TypeDescriptor::Struct(s) => Self::from_struct(s, delimiter),
            TypeDescriptor::List { .. } => Err(Error::InvalidTarget(format!(
                "cannot index {}, unpack lists element by element",
                descriptor.type_name()
            ))),
            TypeDescriptor::Map { .. } | TypeDescriptor::Any => Err(Error::InvalidTarget(format!(
                "cannot infer fields from {}",
                descriptor.type_name()
            ))),
            scalar => Err(Error::InvalidTarget(format!(
                "{} has no fields",
                scalar.type_name()
            ))),
        }
    }

    fn from_struct(descriptor: &StructDescriptor, delimiter: char) -> Result<Self> {
        let mut fields = AHashMap::with_capacity(descriptor.fields.len());
        let mut prefixes = AHashSet::new();

        for field in &descriptor.fields {
            if field.is_skipped() {
                continue;
            }

            let external = field.external_name();
            let canonical = normalize_key_with(external, delimiter);

            let nested = match &field.descriptor {
                TypeDescriptor::Struct(inner) => {
                    Some(Arc::new(Self::from_struct(inner, delimiter)?))
                }
                _ => None,
            };

            for (at, _) in canonical.match_indices(delimiter) {
                prefixes.insert(canonical[..at].to_string());
            }

            // Later declarations win on canonical collisions
            fields.insert(
                canonical,
                IndexedField {
                    external: external.to_string(),
                    descriptor: field.descriptor.clone(),
                    nested,
                },
            );
        }

        Ok(Self {
            name: descriptor.name.clone(),
            fields,
            prefixes,
        })
    }

    /// Cached index for a described type, using the default delimiter
    pub fn for_type<T: Describe + 'static>() -> Result<Arc<Self>> {
        IndexCache::global().get_or_build::<T>(DEFAULT_DELIMITER)
    }

    /// Name of the indexed structure
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, canonical: &str) -> Option<&IndexedField> {
        self.fields.get(canonical)
    }

    pub fn field_type(&self, canonical: &str) -> Option<&TypeDescriptor> {
        self.fields.get(canonical).map(|f| &f.descriptor)
    }

    pub fn external_tag(&self, canonical: &str) -> Option<&str> {
        self.fields.get(canonical).map(|f| f.external.as_str())
    }

    /// Whether some declared canonical name continues past `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }
}

/// Build-once cache of field indexes keyed by Rust type and delimiter
///
/// Reads take a shared lock. A miss builds the index outside the lock and
/// keeps whichever entry was inserted first, so concurrent builders of the
/// same type all end up with the same `Arc`.
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: RwLock<AHashMap<(TypeId, char), Arc<FieldIndex>>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache
    pub fn global() -> &'static IndexCache {
        static GLOBAL: OnceLock<IndexCache> = OnceLock::new();
        GLOBAL.get_or_init(IndexCache::new)
    }

    pub fn get_or_build<T: Describe + 'static>(&self, delimiter: char) -> Result<Arc<FieldIndex>> {
        let key = (TypeId::of::<T>(), delimiter);

        if let Some(index) = self.entries.read().get(&key) {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(FieldIndex::build_with(&T::describe(), delimiter)?);
        debug!(
            structure = index.name(),
            fields = index.len(),
            "built field index"
        );

        let mut entries = self.entries.write();
        Ok(Arc::clone(entries.entry(key).or_insert(index)))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
