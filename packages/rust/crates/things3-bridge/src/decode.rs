//! Result decoder: query output text to records.
//!
//! The accepted shape is a JSON array of objects whose values are all
//! strings. Nothing beyond that is enforced; typed decoding defaults missing
//! optional fields and only requires `title`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::records::FlatRecord;

/// Longest slice of raw output kept in an [`DecodeError::InvalidJson`].
const RAW_PREVIEW_CHARS: usize = 200;

/// Decode output into untyped flat records.
///
/// # Errors
/// Returns [`DecodeError`] when the text is not JSON, not an array, or holds
/// an element that is not an object of strings.
pub fn decode_flat_records(text: &str) -> Result<Vec<FlatRecord>, DecodeError> {
    parse_objects(text)?
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            object
                .into_iter()
                .map(|(field, value)| match value {
                    Value::String(s) => Ok((field, s)),
                    other => Err(DecodeError::NonStringField {
                        index,
                        field,
                        found: json_type(&other),
                    }),
                })
                .collect::<Result<FlatRecord, DecodeError>>()
        })
        .collect()
}

/// Decode output into typed records.
///
/// # Errors
/// Returns [`DecodeError`] on any structural failure (see
/// [`decode_flat_records`]) or when a record lacks a required field.
pub fn decode_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, DecodeError> {
    decode_flat_records(text)?
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let object: Map<String, Value> = record
                .into_iter()
                .map(|(field, value)| (field, Value::String(value)))
                .collect();
            serde_json::from_value(Value::Object(object)).map_err(|source| DecodeError::Shape {
                index,
                record: short_type_name::<T>(),
                source,
            })
        })
        .collect()
}

fn parse_objects(text: &str) -> Result<Vec<Map<String, Value>>, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| DecodeError::InvalidJson {
            source,
            raw: text.chars().take(RAW_PREVIEW_CHARS).collect(),
        })?;

    let items = match value {
        Value::Array(items) => items,
        other => return Err(DecodeError::NotAnArray(json_type(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(object),
            other => Err(DecodeError::NotAnObject {
                index,
                found: json_type(&other),
            }),
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
