//! JSON encoding.
//!
//! Byte values have no JSON type and are written as standard base64
//! strings; [`MslObject::get_bytes`] decodes them again on the way back.
//! Numbers must be integers representable as `i64`. `null` members are
//! treated as absent.

use base64::Engine;
use serde_json::{Map, Value};

use crate::{MslEncoderError, MslObject, MslValue};

/// Encode an object as compact JSON text.
pub fn encode(obj: &MslObject) -> Result<Vec<u8>, MslEncoderError> {
    let value = object_to_json(obj);
    Ok(serde_json::to_vec(&value)?)
}

/// Parse JSON text into an object, rejecting nesting deeper than `max_depth`.
pub fn decode(data: &[u8], max_depth: usize) -> Result<MslObject, MslEncoderError> {
    let value: Value = serde_json::from_slice(data)?;
    match value {
        Value::Object(map) => object_from_json(map, 1, max_depth),
        other => Err(MslEncoderError::Unsupported(format!(
            "top-level JSON value must be an object, found {}",
            json_type(&other)
        ))),
    }
}

fn object_to_json(obj: &MslObject) -> Value {
    let map: Map<String, Value> = obj
        .iter()
        .map(|(k, v)| (k.to_string(), value_to_json(v)))
        .collect();
    Value::Object(map)
}

fn value_to_json(value: &MslValue) -> Value {
    match value {
        MslValue::Bytes(b) => Value::String(base64::engine::general_purpose::STANDARD.encode(b)),
        MslValue::String(s) => Value::String(s.clone()),
        MslValue::Int(i) => Value::from(*i),
        MslValue::Bool(b) => Value::Bool(*b),
        MslValue::Object(o) => object_to_json(o),
        MslValue::Array(a) => Value::Array(a.iter().map(value_to_json).collect()),
    }
}

fn object_from_json(
    map: Map<String, Value>,
    depth: usize,
    max_depth: usize,
) -> Result<MslObject, MslEncoderError> {
    if depth > max_depth {
        return Err(MslEncoderError::TooDeep(max_depth));
    }
    let mut obj = MslObject::new();
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let converted = value_from_json(value, depth, max_depth)?;
        obj.put(key, converted);
    }
    Ok(obj)
}

fn value_from_json(value: Value, depth: usize, max_depth: usize) -> Result<MslValue, MslEncoderError> {
    match value {
        Value::String(s) => Ok(MslValue::String(s)),
        Value::Bool(b) => Ok(MslValue::Bool(b)),
        Value::Number(n) => n.as_i64().map(MslValue::Int).ok_or_else(|| {
            MslEncoderError::Unsupported(format!("non-integer number {}", n))
        }),
        Value::Object(map) => Ok(MslValue::Object(object_from_json(map, depth + 1, max_depth)?)),
        Value::Array(items) => {
            if depth + 1 > max_depth {
                return Err(MslEncoderError::TooDeep(max_depth));
            }
            let converted = items
                .into_iter()
                .map(|item| match item {
                    Value::Null => Err(MslEncoderError::Unsupported(
                        "null array element".to_string(),
                    )),
                    other => value_from_json(other, depth + 1, max_depth),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(MslValue::Array(converted))
        }
        Value::Null => Err(MslEncoderError::Unsupported("null value".to_string())),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
