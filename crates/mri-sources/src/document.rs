//! JSON document parser.
//!
//! Accepts either a top-level array of reading objects or an object carrying
//! them under `readings`. The header list is the union of object keys in
//! first-seen order, so sparse objects still expose every column.

use crate::error::{Result, SourceError};
use crate::{ContainerParser, Table};
use mri_core::{RawRecord, RawValue};
use serde_json::Value;

const READINGS_KEY: &str = "readings";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ContainerParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let document: Value = serde_json::from_slice(bytes)?;
        let items = match document {
            Value::Array(items) => items,
            Value::Object(mut root) => match root.remove(READINGS_KEY) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(SourceError::Malformed(format!(
                        "`{READINGS_KEY}` must be a list of readings"
                    )))
                }
                None => Vec::new(),
            },
            _ => {
                return Err(SourceError::Malformed(
                    "JSON input must be a list of readings".into(),
                ))
            }
        };

        let mut headers: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let Value::Object(object) = item else {
                return Err(SourceError::Malformed(format!(
                    "reading {index} is not a JSON object"
                )));
            };
            let record: RawRecord = object
                .into_iter()
                .map(|(key, value)| {
                    if !headers.contains(&key) {
                        headers.push(key.clone());
                    }
                    (key, raw_value(value))
                })
                .collect();
            records.push(record);
        }

        Ok(Table { headers, records })
    }
}

fn raw_value(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => RawValue::Integer(i),
            None => n.as_f64().map(RawValue::Float).unwrap_or(RawValue::Null),
        },
        Value::String(s) => RawValue::Text(s),
        nested @ (Value::Array(_) | Value::Object(_)) => RawValue::Text(nested.to_string()),
    }
}
