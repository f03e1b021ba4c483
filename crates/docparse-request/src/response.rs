//! Inbound side: response bytes to typed models.

use docparse_core::{CoerceState, Model, ModelSchema, ModelType};
use serde_json::Value;

use crate::error::ResponseError;

/// Decode a JSON response body and coerce it into `T`.
pub fn parse_response<T: ModelType>(bytes: &[u8]) -> Result<T, ResponseError> {
    let wire: Value = serde_json::from_slice(bytes)?;
    Ok(T::coerce(&wire)?)
}

/// Decode and coerce against a schema chosen at runtime.
pub fn parse_response_model(
    schema: &'static ModelSchema,
    bytes: &[u8],
) -> Result<Model, ResponseError> {
    let wire: Value = serde_json::from_slice(bytes)?;
    Ok(Model::coerce(schema, &wire, &mut CoerceState::new())?)
}
