//! Document store schema definitions
//!
//! The store recognizes exactly four field types. A schema maps canonical
//! field names to one of them; `id` is always present as text.

use flatdoc_core::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Name of the document identifier field, implicitly declared as text
pub const ID_FIELD: &str = "id";

/// Null default for date fields: the zero timestamp
pub const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// Null default for geolocation fields
pub const ZERO_GEOLOCATION: &str = "0.0,0.0";

/// Field type as declared in the store schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SchemaType {
    /// Free text, the default for multi-value fields
    Text,
    /// RFC 3339 timestamp
    Date,
    /// Integer or floating point number
    Number,
    /// `"lat,lon"` pair
    Geolocation,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Text => "text",
            SchemaType::Date => "date",
            SchemaType::Number => "number",
            SchemaType::Geolocation => "geolocation",
        }
    }

    /// Value stored in place of `null` for this type
    pub fn null_default(&self) -> Value {
        match self {
            SchemaType::Text => Value::Text(String::new()),
            SchemaType::Date => Value::Text(ZERO_TIMESTAMP.to_string()),
            SchemaType::Number => Value::Int(0),
            SchemaType::Geolocation => Value::Text(ZERO_GEOLOCATION.to_string()),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(SchemaType::Text),
            "date" => Ok(SchemaType::Date),
            "number" => Ok(SchemaType::Number),
            "geolocation" => Ok(SchemaType::Geolocation),
            other => Err(Error::UnknownSchemaType(other.to_string())),
        }
    }
}

impl TryFrom<String> for SchemaType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Store schema: canonical field name to field type.
///
/// Every definition contains `id: text`, including ones built from
/// deserialized input that omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, SchemaType>")]
pub struct SchemaDefinition {
    #[serde(flatten)]
    fields: BTreeMap<String, SchemaType>,
}

impl Default for SchemaDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDefinition {
    /// Create a schema holding only the `id` field
    pub fn new() -> Self {
        Self::from(BTreeMap::new())
    }

    /// Create a schema from `(name, type)` pairs
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaType)>,
        K: Into<String>,
    {
        Self::from(
            fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    /// Builder-style field declaration
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, schema_type: SchemaType) -> Self {
        self.insert(name, schema_type);
        self
    }

    /// Declare or redeclare a field. `id` always stays text.
    pub fn insert(&mut self, name: impl Into<String>, schema_type: SchemaType) {
        let name = name.into();
        if name != ID_FIELD {
            self.fields.insert(name, schema_type);
        }
    }

    pub fn get(&self, name: &str) -> Option<SchemaType> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// A definition always holds `id`, so it is never empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SchemaType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Parse a JSON object of `field: type` pairs.
    ///
    /// Unrecognized type tags fail with [`Error::UnknownSchemaType`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::from_tags(raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_reader(reader)?;
        Self::from_tags(raw)
    }

    /// Load a schema from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn from_tags(raw: BTreeMap<String, String>) -> Result<Self> {
        let fields = raw
            .into_iter()
            .map(|(name, tag)| Ok((name, tag.parse::<SchemaType>()?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self::from(fields))
    }
}

impl From<BTreeMap<String, SchemaType>> for SchemaDefinition {
    fn from(mut fields: BTreeMap<String, SchemaType>) -> Self {
        fields.insert(ID_FIELD.to_string(), SchemaType::Text);
        Self { fields }
    }
}
