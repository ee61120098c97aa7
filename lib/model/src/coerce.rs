//! Coercion of stored values back to declared types
//!
//! The store has no boolean type and returns numbers as strings in some
//! responses. Booleans are accepted as `"true"`, `"false"`, `"1"`, `"0"` or
//! the numbers 1 and 0; strings on numeric fields are parsed for the declared
//! width. Anything else passes through for serde to handle.

use crate::descriptor::{FloatKind, IntKind, TypeDescriptor};
use flatdoc_core::{Error, Result, Value};

/// Coerce a value to the declared type of `field`
pub fn coerce(field: &str, value: Value, declared: &TypeDescriptor) -> Result<Value> {
    match declared {
        TypeDescriptor::Bool => decode_bool(field, &value).map(Value::Bool),
        TypeDescriptor::Int { kind } => match value {
            Value::Text(s) => decode_int(field, &s, *kind).map(Value::Int),
            other => Ok(other),
        },
        TypeDescriptor::Float { kind } => match value {
            Value::Text(s) => decode_float(field, &s, *kind).map(Value::Float),
            other => Ok(other),
        },
        _ => Ok(value),
    }
}

pub fn decode_bool(field: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Text(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(cannot_decode(field, value, "bool")),
        },
        Value::Int(1) => Ok(true),
        Value::Int(0) => Ok(false),
        Value::Float(f) if *f == 1.0 => Ok(true),
        Value::Float(f) if *f == 0.0 => Ok(false),
        _ => Err(cannot_decode(field, value, "bool")),
    }
}

pub fn decode_int(field: &str, s: &str, kind: IntKind) -> Result<i64> {
    let (min, max) = kind.range();
    match s.parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(cannot_decode(field, &Value::from(s), kind.as_str())),
    }
}

pub fn decode_float(field: &str, s: &str, kind: FloatKind) -> Result<f64> {
    let parsed = match kind {
        FloatKind::F32 => s.parse::<f32>().map(f64::from).ok(),
        FloatKind::F64 => s.parse::<f64>().ok(),
    };

    match parsed {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(cannot_decode(field, &Value::from(s), kind.as_str())),
    }
}

fn cannot_decode(field: &str, value: &Value, target: &str) -> Error {
    Error::Coercion {
        field: field.to_string(),
        value: value.to_string(),
        target: target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_representations() {
        for (value, expected) in [
            (Value::from("true"), true),
            (Value::from("false"), false),
            (Value::from("1"), true),
            (Value::from("0"), false),
            (Value::Int(1), true),
            (Value::Int(0), false),
            (Value::Float(1.0), true),
            (Value::Float(0.0), false),
            (Value::Bool(true), true),
        ] {
            assert_eq!(
                coerce("flag", value.clone(), &TypeDescriptor::Bool).unwrap(),
                Value::Bool(expected),
                "value {}",
                value
            );
        }
    }

    #[test]
    fn test_malformed_bool_is_an_error() {
        for value in [Value::from("yes"), Value::Int(2), Value::Float(0.5), Value::Null] {
            let err = coerce("flag", value, &TypeDescriptor::Bool).unwrap_err();
            assert!(matches!(
                err,
                Error::Coercion { ref field, ref target, .. } if field == "flag" && target == "bool"
            ));
        }
    }

    #[test]
    fn test_int_parsing_per_kind() {
        let u8_field = TypeDescriptor::Int { kind: IntKind::U8 };
        assert_eq!(coerce("n", Value::from("200"), &u8_field).unwrap(), Value::Int(200));
        assert!(coerce("n", Value::from("300"), &u8_field).is_err());
        assert!(coerce("n", Value::from("-1"), &u8_field).is_err());
        assert!(coerce("n", Value::from("1.5"), &u8_field).is_err());

        let i64_field = TypeDescriptor::Int { kind: IntKind::I64 };
        assert_eq!(coerce("n", Value::from("-42"), &i64_field).unwrap(), Value::Int(-42));
    }

    #[test]
    fn test_float_parsing() {
        let f64_field = TypeDescriptor::Float { kind: FloatKind::F64 };
        assert_eq!(coerce("x", Value::from("1.123"), &f64_field).unwrap(), Value::Float(1.123));
        assert!(coerce("x", Value::from("abc"), &f64_field).is_err());
        assert!(coerce("x", Value::from("NaN"), &f64_field).is_err());

        let f32_field = TypeDescriptor::Float { kind: FloatKind::F32 };
        assert_eq!(
            coerce("x", Value::from("0.5"), &f32_field).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn test_non_text_numbers_pass_through() {
        let field = TypeDescriptor::Int { kind: IntKind::U8 };
        assert_eq!(coerce("n", Value::Int(7), &field).unwrap(), Value::Int(7));
        assert_eq!(coerce("n", Value::Float(2.5), &field).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_other_types_pass_through() {
        assert_eq!(
            coerce("t", Value::Int(5), &TypeDescriptor::Text).unwrap(),
            Value::Int(5)
        );
        assert_eq!(
            coerce("a", Value::from("x"), &TypeDescriptor::Any).unwrap(),
            Value::from("x")
        );
    }
}
