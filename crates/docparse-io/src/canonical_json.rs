//! Deterministic JSON canonicalization.
//!
//! Wire maps keep insertion order (schema order for dumped models, server
//! order for coerced ones). For comparison and cache keys we want stable
//! bytes instead:
//! - object keys are sorted lexicographically
//! - arrays preserve order
//! - output is minified JSON with no extra whitespace

use docparse_core::{ConvertError, DumpState, Model, ModelType};
use serde_json::Value;

/// Dump an untyped model and render it canonically.
pub fn canonical_model_json(model: &Model) -> Result<String, ConvertError> {
    let wire = model.dump(&mut DumpState::new())?;
    Ok(canonicalize_value(wire).to_string())
}

/// Typed form of [`canonical_model_json`].
pub fn model_to_canonical_json<T: ModelType>(model: &T) -> Result<String, ConvertError> {
    canonical_model_json(&model.to_model()?)
}

/// Deep-sort object keys; arrays and scalars pass through.
pub fn canonicalize_value(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> =
                map.into_iter().map(|(k, v)| (k, canonicalize_value(v))).collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        scalar => scalar,
    }
}
