//! Loading generated field values from JSON.
//!
//! Generators usually return their output as a flat JSON object such as
//! `{"title": "...", "description": "..."}`. These helpers turn that into the
//! name → text map the validator consumes.

use crate::error::FieldsError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Parse a JSON object of string values into a field map.
pub fn parse_fields(json: &str) -> Result<BTreeMap<String, String>, FieldsError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(object) = value else {
        return Err(FieldsError::NotAnObject);
    };

    object
        .into_iter()
        .map(|(field, value)| match value {
            Value::String(text) => Ok((field, text)),
            _ => Err(FieldsError::NonStringValue { field }),
        })
        .collect()
}

/// Read and parse a JSON field map from a file.
pub fn load_fields(path: impl AsRef<Path>) -> Result<BTreeMap<String, String>, FieldsError> {
    let contents = std::fs::read_to_string(path)?;
    parse_fields(&contents)
}
