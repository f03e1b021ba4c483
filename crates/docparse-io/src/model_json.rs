//! Parsing model JSON text with friendlier diagnostics.
//!
//! The engine is fail-fast, so a payload missing three required keys only
//! reports the first. For hand-written fixtures it is more useful to list all
//! missing top-level keys at once; deeper problems still come from the engine.

use std::fmt;

use docparse_core::error::wire_shape;
use docparse_core::{CoerceState, ConvertError, Model, ModelSchema, ModelType};
use docparse_request::diagnostics::from_convert_error;
use docparse_request::{Diagnostic, DiagnosticCode};
use serde_json::Value;

#[derive(Debug)]
pub enum ModelJsonError {
    /// The input was not valid JSON.
    InvalidJson(serde_json::Error),
    /// Valid JSON, but not an object.
    NotAnObject {
        model: &'static str,
        found: &'static str,
    },
    /// Valid JSON object missing required top-level wire keys.
    MissingRequiredTopLevelFields {
        model: &'static str,
        missing: Vec<&'static str>,
        required: Vec<&'static str>,
    },
    /// Top-level keys present, but the engine rejected the value.
    Conversion {
        model: &'static str,
        error: ConvertError,
    },
}

impl ModelJsonError {
    /// The underlying engine error, when there is one.
    pub fn convert_error(&self) -> Option<&ConvertError> {
        match self {
            ModelJsonError::Conversion { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Machine-readable form. A missing-fields error yields one diagnostic
    /// per missing key.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ModelJsonError::InvalidJson(e) => {
                vec![Diagnostic::new(DiagnosticCode::InvalidJson, None, e.to_string())]
            }
            ModelJsonError::NotAnObject { .. } => vec![Diagnostic::new(
                DiagnosticCode::TypeMismatch,
                Some("$".to_string()),
                self.to_string(),
            )],
            ModelJsonError::MissingRequiredTopLevelFields { missing, .. } => missing
                .iter()
                .map(|key| {
                    Diagnostic::new(
                        DiagnosticCode::MissingRequiredField,
                        Some(key.to_string()),
                        format!("missing required field `{key}`"),
                    )
                })
                .collect(),
            ModelJsonError::Conversion { error, .. } => from_convert_error(error),
        }
    }
}

impl fmt::Display for ModelJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelJsonError::InvalidJson(e) => {
                write!(f, "Invalid JSON: {e}")
            }
            ModelJsonError::NotAnObject { model, found } => {
                write!(f, "Invalid {model} JSON: expected an object, found {found}.")
            }
            ModelJsonError::MissingRequiredTopLevelFields {
                model,
                missing,
                required,
            } => {
                write!(
                    f,
                    "Invalid {model} JSON: missing required top-level field(s): {}. Required top-level fields: {}.",
                    missing.join(", "),
                    required.join(", ")
                )
            }
            ModelJsonError::Conversion { model, error } => {
                write!(f, "Invalid {model} JSON: {error}.")
            }
        }
    }
}

impl std::error::Error for ModelJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelJsonError::InvalidJson(e) => Some(e),
            ModelJsonError::Conversion { error, .. } => Some(error),
            ModelJsonError::NotAnObject { .. }
            | ModelJsonError::MissingRequiredTopLevelFields { .. } => None,
        }
    }
}

/// Parse JSON text into the untyped model for `schema`.
pub fn parse_model_json(schema: &'static ModelSchema, s: &str) -> Result<Model, ModelJsonError> {
    let v: Value = serde_json::from_str(s).map_err(ModelJsonError::InvalidJson)?;
    coerce_checked(schema, &v)
}

/// Parse JSON text into a typed model.
pub fn parse_model_json_str<T: ModelType>(s: &str) -> Result<T, ModelJsonError> {
    let schema = T::schema();
    let model = parse_model_json(schema, s)?;
    T::from_model(model).map_err(|error| ModelJsonError::Conversion {
        model: schema.name(),
        error,
    })
}

/// Coerce an already-decoded value, listing every missing required
/// top-level key before handing over to the engine.
pub fn coerce_checked(schema: &'static ModelSchema, v: &Value) -> Result<Model, ModelJsonError> {
    let obj = v.as_object().ok_or(ModelJsonError::NotAnObject {
        model: schema.name(),
        found: wire_shape(v),
    })?;

    let required = schema.required_wire_names();
    let missing: Vec<&'static str> = required
        .iter()
        .copied()
        .filter(|k| !obj.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        return Err(ModelJsonError::MissingRequiredTopLevelFields {
            model: schema.name(),
            missing,
            required,
        });
    }

    Model::coerce(schema, v, &mut CoerceState::new()).map_err(|error| ModelJsonError::Conversion {
        model: schema.name(),
        error,
    })
}
