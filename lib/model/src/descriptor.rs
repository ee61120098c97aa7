//! Type descriptors
//!
//! Explicit metadata describing the shape of an application type: scalar
//! kind, list, map, or a structure with named fields. Each field has a name,
//! an optional external tag (the key the type serializes under) and the
//! descriptor of its own type.
//!
//! Descriptors are usually produced by [`Describe`] implementations, but
//! they are plain serde data and can also be loaded from JSON:
//!
//! ```json
//! {"type": "struct", "name": "Product", "fields": [
//!     {"name": "title", "tag": "_title", "descriptor": {"type": "text"}},
//!     {"name": "price", "descriptor": {"type": "float", "kind": "f64"}}
//! ]}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Tag that excludes a field from the index
pub const SKIP_TAG: &str = "-";

/// Integer width of a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntKind {
    /// Inclusive range of values representable both by this kind and by
    /// [`flatdoc_core::Value::Int`]
    pub fn range(&self) -> (i64, i64) {
        match self {
            IntKind::I8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
            IntKind::I16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
            IntKind::I32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            IntKind::I64 | IntKind::Isize => (i64::MIN, i64::MAX),
            IntKind::U8 => (0, i64::from(u8::MAX)),
            IntKind::U16 => (0, i64::from(u16::MAX)),
            IntKind::U32 => (0, i64::from(u32::MAX)),
            IntKind::U64 | IntKind::Usize => (0, i64::MAX),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntKind::I8 => "i8",
            IntKind::I16 => "i16",
            IntKind::I32 => "i32",
            IntKind::I64 => "i64",
            IntKind::Isize => "isize",
            IntKind::U8 => "u8",
            IntKind::U16 => "u16",
            IntKind::U32 => "u32",
            IntKind::U64 => "u64",
            IntKind::Usize => "usize",
        }
    }
}

/// Floating point width of a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatKind::F32 => "f32",
            FloatKind::F64 => "f64",
        }
    }
}

/// Shape of an application type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Bool,
    Int { kind: IntKind },
    Float { kind: FloatKind },
    Text,
    /// Any JSON value, taken as is
    Any,
    List { items: Box<TypeDescriptor> },
    /// Dynamic map with string keys and no declared fields
    Map { values: Box<TypeDescriptor> },
    Struct(StructDescriptor),
}

impl TypeDescriptor {
    pub fn list(items: TypeDescriptor) -> Self {
        TypeDescriptor::List {
            items: Box::new(items),
        }
    }

    pub fn map(values: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            values: Box::new(values),
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, TypeDescriptor::Struct(_))
    }

    /// Types whose values may legitimately be nested maps
    pub fn is_dynamic(&self) -> bool {
        matches!(self, TypeDescriptor::Map { .. } | TypeDescriptor::Any)
    }

    /// Human readable name for error messages
    pub fn type_name(&self) -> String {
        match self {
            TypeDescriptor::Bool => "bool".to_string(),
            TypeDescriptor::Int { kind } => kind.as_str().to_string(),
            TypeDescriptor::Float { kind } => kind.as_str().to_string(),
            TypeDescriptor::Text => "text".to_string(),
            TypeDescriptor::Any => "any".to_string(),
            TypeDescriptor::List { items } => format!("list of {}", items.type_name()),
            TypeDescriptor::Map { values } => format!("map of {}", values.type_name()),
            TypeDescriptor::Struct(s) => format!("struct {}", s.name),
        }
    }
}

impl From<StructDescriptor> for TypeDescriptor {
    fn from(descriptor: StructDescriptor) -> Self {
        TypeDescriptor::Struct(descriptor)
    }
}

/// Declared fields of a structure, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field serialized under its own name
    #[must_use]
    pub fn field<T: Describe>(self, name: impl Into<String>) -> Self {
        self.declare(FieldDescriptor::new(name, T::describe()))
    }

    /// Declare a field serialized under an explicit tag
    #[must_use]
    pub fn tagged<T: Describe>(self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.declare(FieldDescriptor::new(name, T::describe()).with_tag(tag))
    }

    /// Declare a field excluded from denormalization
    #[must_use]
    pub fn skipped(self, name: impl Into<String>) -> Self {
        self.declare(FieldDescriptor::new(name, TypeDescriptor::Any).with_tag(SKIP_TAG))
    }

    #[must_use]
    pub fn declare(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::Struct(self)
    }
}

/// A single declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub descriptor: TypeDescriptor,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            tag: None,
            descriptor,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Key the field serializes under: the tag when present, else the name.
    /// An empty tag counts as absent.
    pub fn external_name(&self) -> &str {
        match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag,
            _ => &self.name,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.tag.as_deref() == Some(SKIP_TAG)
    }
}

/// Types that can describe their own shape
///
/// Implemented for the standard scalar and collection types. Structures
/// implement it with the [`StructDescriptor`] builder:
///
/// ```rust
/// use flatdoc_model::{Describe, StructDescriptor, TypeDescriptor};
///
/// struct Author {
///     name: String,
///     age: u32,
/// }
///
/// impl Describe for Author {
///     fn describe() -> TypeDescriptor {
///         StructDescriptor::new("Author")
///             .field::<String>("name")
///             .tagged::<u32>("age", "Age")
///             .build()
///     }
/// }
///
/// assert!(Author::describe().is_struct());
/// ```
///
/// Recursive types cannot be described: the descriptor is built eagerly.
pub trait Describe {
    fn describe() -> TypeDescriptor;
}

macro_rules! describe_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Int { kind: IntKind::$kind }
                }
            }
        )*
    };
}

// Documents carry integers as `i64`: `u64` and `usize` values above
// `i64::MAX` fail to marshal
describe_int!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
);

impl Describe for f32 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Float { kind: FloatKind::F32 }
    }
}

impl Describe for f64 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Float { kind: FloatKind::F64 }
    }
}

impl Describe for bool {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Bool
    }
}

impl Describe for String {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Text
    }
}

impl Describe for char {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Text
    }
}

impl Describe for serde_json::Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Any
    }
}

impl Describe for flatdoc_core::Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Any
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<V: Describe, S> Describe for HashMap<String, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}
