//! Structuring: the inverse of flattening
//!
//! Splits every flat key on the delimiter and deep-inserts its value,
//! creating intermediate maps on the way. When a segment is needed both as a
//! leaf and as a branch, whichever key is inserted later replaces the earlier
//! structure. Keys are inserted in sorted order, so `a` is always replaced by
//! `a_b` and never the other way around.

use crate::{Map, Value};

/// Re-nest flat entries along delimiter boundaries
pub fn structure<I>(flat: I, delimiter: char) -> Map
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut root = Map::new();
    for (key, value) in flat {
        deep_set(&mut root, &key, value, delimiter);
    }
    root
}

fn deep_set(root: &mut Map, key: &str, value: Value, delimiter: char) {
    let mut segments: Vec<&str> = key.split(delimiter).collect();
    let leaf = segments.pop().unwrap_or_default();

    let mut node = root;
    for segment in segments {
        node = branch(node, segment);
    }

    node.insert(leaf.to_string(), value);
}

/// Descend into `segment`, replacing whatever non-map value sits there
fn branch<'a>(node: &'a mut Map, segment: &str) -> &'a mut Map {
    let slot = node
        .entry(segment.to_string())
        .or_insert_with(|| Value::Map(Map::new()));

    if !slot.is_map() {
        *slot = Value::Map(Map::new());
    }

    match slot {
        Value::Map(inner) => inner,
        _ => unreachable!("slot was just replaced by a map"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::FlatDocument;
    use serde_json::json;

    fn flat(json: serde_json::Value) -> FlatDocument {
        FlatDocument::try_from(Value::from(json)).unwrap()
    }

    #[test]
    fn test_structure_nests_keys() {
        let nested = structure(flat(json!({"foo": "1", "bar_baz": "2", "bar_qux_x": 3})), '_');

        assert_eq!(
            Value::Map(nested),
            Value::from(json!({"foo": "1", "bar": {"baz": "2", "qux": {"x": 3}}}))
        );
    }

    #[test]
    fn test_raw_wrappers_are_inserted_as_is() {
        let nested = structure(flat(json!({"deep_stuff": {"raw": "value"}})), '_');

        assert_eq!(
            Value::Map(nested),
            Value::from(json!({"deep": {"stuff": {"raw": "value"}}}))
        );
    }

    #[test]
    fn test_leaf_then_branch_overwrites_leaf() {
        let nested = structure(flat(json!({"a": 1, "a_b": 2})), '_');
        assert_eq!(Value::Map(nested), Value::from(json!({"a": {"b": 2}})));
    }

    #[test]
    fn test_branch_then_leaf_overwrites_branch() {
        let entries = vec![
            ("a_b".to_string(), Value::Int(2)),
            ("a".to_string(), Value::Int(1)),
        ];
        let nested = structure(entries, '_');
        assert_eq!(Value::Map(nested), Value::from(json!({"a": 1})));
    }

    #[test]
    fn test_leading_delimiter_yields_empty_segment() {
        let nested = structure(flat(json!({"_meta": {}})), '_');
        assert_eq!(Value::Map(nested), Value::from(json!({"": {"meta": {}}})));
    }

    #[test]
    fn test_inverse_of_flatten_for_canonical_keys() {
        let original = Value::from(json!({
            "title": "x",
            "author": {"name": "y", "address": {"city": "z"}},
            "tags": ["a", "b"]
        }));

        let entries = flatten(original.clone(), '_').unwrap();
        assert_eq!(Value::Map(structure(entries, '_')), original);
    }
}
