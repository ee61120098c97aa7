//! Marshaling of application structures into store documents
//!
//! Structures are transcoded to [`Value`] through serde, normalized and
//! serialized to JSON. A structure that serializes to a list is handled
//! element by element and produces a JSON array.

use crate::normalize::Normalizer;
use crate::schema::SchemaDefinition;
use flatdoc_core::{FlatDocument, Result, Value};
use serde::Serialize;

impl Normalizer {
    /// Transcode and normalize a single structure
    pub fn to_flat<T: Serialize + ?Sized>(
        &self,
        input: &T,
        schema: &SchemaDefinition,
    ) -> Result<FlatDocument> {
        self.normalize(Value::from_serialize(input)?, schema)
    }

    /// Normalize a structure, or every element of a list, and serialize
    /// the result to JSON
    pub fn marshal<T: Serialize + ?Sized>(
        &self,
        input: &T,
        schema: &SchemaDefinition,
    ) -> Result<Vec<u8>> {
        match Value::from_serialize(input)? {
            Value::List(items) => {
                let documents = self.normalize_all(items, schema)?;
                Ok(serde_json::to_vec(&documents)?)
            }
            single => {
                let document = self.normalize(single, schema)?;
                Ok(serde_json::to_vec(&document)?)
            }
        }
    }
}

/// Transcode and normalize a structure with the default delimiter
pub fn to_flat<T: Serialize + ?Sized>(
    input: &T,
    schema: &SchemaDefinition,
) -> Result<FlatDocument> {
    Normalizer::default().to_flat(input, schema)
}

/// Marshal a structure or a list of structures with the default delimiter
pub fn marshal<T: Serialize + ?Sized>(input: &T, schema: &SchemaDefinition) -> Result<Vec<u8>> {
    Normalizer::default().marshal(input, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;
    use flatdoc_core::Error;
    use serde_json::json;

    #[derive(Serialize)]
    struct Baz {
        #[serde(rename = "_doo_")]
        doo: f64,
    }

    #[derive(Serialize)]
    struct Nested {
        #[serde(rename = "_fooBar")]
        foo_bar: String,
        baz: Baz,
        #[serde(rename = "IncludedBasedOnFieldName")]
        included: String,
        #[serde(skip)]
        ignored_json: String,
        #[serde(rename = "notInSchema")]
        not_in_schema: String,
        #[serde(rename = "boolAsText")]
        bool_as_text: bool,
        #[serde(rename = "boolAsNumber")]
        bool_as_number: bool,
    }

    fn nested_schema() -> SchemaDefinition {
        SchemaDefinition::from_fields([
            ("foobar", SchemaType::Text),
            ("baz_doo", SchemaType::Number),
            ("ignoredjson", SchemaType::Text),
            ("includedbasedonfieldname", SchemaType::Text),
            ("boolastext", SchemaType::Text),
            ("boolasnumber", SchemaType::Number),
        ])
    }

    #[test]
    fn test_marshal_structure() {
        let item = Nested {
            foo_bar: "hello world".to_string(),
            baz: Baz { doo: 123.0 },
            included: "a value".to_string(),
            ignored_json: "ignored".to_string(),
            not_in_schema: "ignored".to_string(),
            bool_as_text: true,
            bool_as_number: true,
        };

        let data = marshal(&item, &nested_schema()).unwrap();
        let out: serde_json::Value = serde_json::from_slice(&data).unwrap();

        assert_eq!(
            out,
            json!({
                "baz_doo": 123.0,
                "foobar": "hello world",
                "includedbasedonfieldname": "a value",
                "boolastext": "true",
                "boolasnumber": 1
            })
        );
    }

    #[derive(Serialize)]
    struct Model {
        foo: String,
        bar: f64,
        baz: bool,
    }

    #[test]
    fn test_marshal_list_element_by_element() {
        let schema = SchemaDefinition::from_fields([
            ("foo", SchemaType::Text),
            ("bar", SchemaType::Number),
            ("baz", SchemaType::Number),
        ]);
        let input = vec![
            Model { foo: "bar".to_string(), bar: 1111111.0, baz: true },
            Model { foo: "val".to_string(), bar: 999.123, baz: false },
        ];

        let data = marshal(&input, &schema).unwrap();
        let out: serde_json::Value = serde_json::from_slice(&data).unwrap();

        assert_eq!(
            out,
            json!([
                {"foo": "bar", "bar": 1111111.0, "baz": 1},
                {"foo": "val", "bar": 999.123, "baz": 0}
            ])
        );
    }

    #[test]
    fn test_to_flat() {
        let schema = SchemaDefinition::new().with_field("foo", SchemaType::Text);
        let flat = to_flat(&json!({"Foo": "x", "other": 1}), &schema).unwrap();
        assert_eq!(flat.get("foo"), Some(&Value::from("x")));
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_marshal_scalar_is_a_flatten_error() {
        assert!(matches!(
            marshal(&42, &SchemaDefinition::new()),
            Err(Error::Flatten(_))
        ));
    }

    #[test]
    fn test_marshal_list_of_scalars_is_a_flatten_error() {
        assert!(matches!(
            marshal(&vec![1, 2], &SchemaDefinition::new()),
            Err(Error::Flatten(_))
        ));
    }
}
