//! Error types for loading generated field maps.

use thiserror::Error;

/// Error raised while reading a JSON field map.
#[derive(Error, Debug)]
pub enum FieldsError {
    /// The field file could not be read.
    #[error("Failed to read fields file: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not valid JSON.
    #[error("Invalid fields JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value was not an object.
    #[error("Fields JSON must be an object mapping field names to text")]
    NotAnObject,

    /// A field value was not a string.
    #[error("Field '{field}' must be a string")]
    NonStringValue { field: String },
}
