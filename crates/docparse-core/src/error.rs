use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::path::FieldPath;

/// Conversion failure. Every variant carries the location it occurred at.
///
/// Coercion is fail-fast: a conversion either produces a complete value or
/// returns exactly one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("missing required field `{path}`")]
    MissingRequiredField { path: FieldPath },

    #[error("unexpected null at `{path}`")]
    UnexpectedNull { path: FieldPath },

    #[error("expected {expected} at `{path}`, found {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: String,
        actual: String,
    },

    #[error("no variant of {union} matched at `{path}`: {}", VariantFailures(.failures))]
    UnionExhausted {
        path: FieldPath,
        union: String,
        failures: Vec<VariantFailure>,
    },

    #[error("upload at `{path}` was already consumed and cannot be sent again")]
    UnresumableResource { path: FieldPath },

    #[error("failed to read upload at `{path}`: {message}")]
    ResourceRead { path: FieldPath, message: String },

    #[error("model {model} has no field named `{field}`")]
    UnknownField { model: String, field: String },
}

impl ConvertError {
    /// Where the failure happened. `UnknownField` is a builder error and has no
    /// wire location, so it reports the root.
    pub fn path(&self) -> FieldPath {
        match self {
            ConvertError::MissingRequiredField { path }
            | ConvertError::UnexpectedNull { path }
            | ConvertError::TypeMismatch { path, .. }
            | ConvertError::UnionExhausted { path, .. }
            | ConvertError::UnresumableResource { path }
            | ConvertError::ResourceRead { path, .. } => path.clone(),
            ConvertError::UnknownField { .. } => FieldPath::root(),
        }
    }

    pub(crate) fn mismatch(path: &FieldPath, expected: impl Into<String>, actual: &Value) -> Self {
        ConvertError::TypeMismatch {
            path: path.clone(),
            expected: expected.into(),
            actual: wire_shape(actual).to_string(),
        }
    }
}

/// One union variant's reason for rejecting a value.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantFailure {
    pub variant: String,
    pub error: Box<ConvertError>,
}

struct VariantFailures<'a>(&'a [VariantFailure]);

impl fmt::Display for VariantFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", failure.variant, failure.error)?;
        }
        Ok(())
    }
}

/// Human name for the shape of a wire value, used in mismatch messages.
pub fn wire_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
