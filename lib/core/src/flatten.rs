//! Flattening of nested documents
//!
//! Walks a nested map depth-first and emits one entry per leaf, keyed by the
//! delimiter-joined path of raw keys. Lists are leaves and are never
//! traversed, so `{"a": {"b": [1, 2]}}` flattens to `a_b: [1, 2]`.

use crate::{Error, Map, Result, Value};

/// Deepest nesting accepted before the document is treated as cyclic
pub const MAX_DEPTH: usize = 128;

/// Flat entries in sorted depth-first order (sibling keys ascending).
/// Raw keys are not canonicalized yet, so distinct paths may later collide.
pub type FlatEntries = Vec<(String, Value)>;

/// Flatten a nested document.
///
/// The root must be a map. Empty nested maps emit nothing.
pub fn flatten(document: Value, delimiter: char) -> Result<FlatEntries> {
    match document {
        Value::Map(map) => {
            let mut entries = Vec::with_capacity(map.len());
            flatten_into(map, None, delimiter, 0, &mut entries)?;
            Ok(entries)
        }
        other => Err(Error::Flatten(format!(
            "document root must be a map, got {}",
            other.kind()
        ))),
    }
}

fn flatten_into(
    map: Map,
    prefix: Option<&str>,
    delimiter: char,
    depth: usize,
    entries: &mut FlatEntries,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(Error::Flatten(format!(
            "nesting deeper than {} levels",
            MAX_DEPTH
        )));
    }

    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, delimiter, key),
            None => key,
        };

        match value {
            Value::Map(inner) => flatten_into(inner, Some(&path), delimiter, depth + 1, entries)?,
            leaf => entries.push((path, leaf)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_flatten_nested_paths() {
        let entries = flatten(
            doc(json!({
                "_fooBar": "hello",
                "baz": {"_doo_": 123.0},
                "something": {"quiteNested": {"what": 1}}
            })),
            '_',
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![
                ("_fooBar".to_string(), Value::from("hello")),
                ("baz__doo_".to_string(), Value::Float(123.0)),
                ("something_quiteNested_what".to_string(), Value::Int(1)),
            ]
        );
    }

    #[test]
    fn test_lists_are_leaves() {
        let entries = flatten(doc(json!({"a": {"b": [1, {"c": 2}]}})), '_').unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "a_b");
        assert!(entries[0].1.is_list());
    }

    #[test]
    fn test_null_is_a_leaf_and_empty_map_is_not() {
        let entries = flatten(doc(json!({"x": null, "empty": {}})), '_').unwrap();
        assert_eq!(entries, vec![("x".to_string(), Value::Null)]);
    }

    #[test]
    fn test_root_must_be_a_map() {
        assert!(matches!(flatten(Value::Int(1), '_'), Err(Error::Flatten(_))));
        assert!(matches!(
            flatten(Value::List(vec![]), '_'),
            Err(Error::Flatten(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::from("leaf");
        for _ in 0..MAX_DEPTH + 1 {
            let mut map = Map::new();
            map.insert("n".to_string(), value);
            value = Value::Map(map);
        }

        assert!(matches!(flatten(value, '_'), Err(Error::Flatten(_))));
    }

    #[test]
    fn test_custom_delimiter() {
        let entries = flatten(doc(json!({"a": {"b": 1}})), '.').unwrap();
        assert_eq!(entries[0].0, "a.b");
    }
}
