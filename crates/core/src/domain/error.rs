// Domain Error Types
//
// Everything here is raised locally, before any request leaves the process.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Missing objectID for `{action}` batch operation at position {position}")]
    MissingObjectId { action: String, position: usize },

    #[error("Record has no usable objectID")]
    RecordWithoutObjectId,

    #[error("Invalid type for `{param}`: expected {expected}")]
    InvalidType { param: String, expected: String },

    #[error("Unexpected shape for `{field}`: {found}")]
    UnexpectedShape { field: String, found: String },

    #[error("Cannot apply {operation} to `{attribute}`: {reason}")]
    InvalidOperation {
        operation: String,
        attribute: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    pub fn unexpected_shape(field: impl Into<String>, found: &serde_json::Value) -> Self {
        Self::UnexpectedShape {
            field: field.into(),
            found: json_kind(found).to_string(),
        }
    }

    pub fn invalid_type(param: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidType {
            param: param.into(),
            expected: expected.into(),
        }
    }
}

/// Short name of a JSON value's shape, used in error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
