use docparse_core::{ConvertError, DumpState, ModelType};
use serde_json::Value;

/// Dump to a wire value, discarding the retry flag and upload parts.
pub fn to_wire<T: ModelType>(model: &T) -> Result<Value, ConvertError> {
    model.dump_with(&mut DumpState::new())
}

/// Serialize as minified JSON (no whitespace), fields in declared order.
pub fn to_minified_json<T: ModelType>(model: &T) -> Result<String, ConvertError> {
    to_wire(model).map(|v| v.to_string())
}

/// Serialize as pretty JSON (for debugging).
pub fn to_pretty_json<T: ModelType>(model: &T) -> Result<String, ConvertError> {
    to_wire(model).map(|v| format!("{v:#}"))
}
