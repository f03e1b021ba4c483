//! `docparse-io` is the single supported public entrypoint for the docparse
//! client's wire types and conversion helpers.
//!
//! This crate contains **no** HTTP transport. It focuses on:
//! - typed request and response models
//! - schema-driven coercion and dump
//! - request preparation (retry gating, upload parts)
//! - canonical JSON

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `docparse_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

// Re-export the conversion engine.
#[doc(hidden)]
pub mod engine {
    pub use docparse_core::error::{VariantFailure, wire_shape};
    pub use docparse_core::typed::{model_from_typed, model_into_typed};
    pub use docparse_core::{
        CoerceState, ConvertError, Converter, DumpState, EnumLiteral, EnumValue, Field, FieldPath,
        FieldSchema, FromTyped, IntoTyped, Model, ModelRef, ModelSchema, ModelType, OpenEnum,
        PathSegment, Primitive, SchemaRegistry, Traversal, TypedValue, UnionValue, UploadPart,
        UploadResource, WireEnum,
    };
}

// Re-export the parse API models.
#[doc(hidden)]
pub mod models {
    pub use docparse_models::serialize::{to_minified_json, to_pretty_json, to_wire};
    pub use docparse_models::{
        Block, BlockType, BoundingBox, Chunk, FullResult, JobStatus, OcrMode, OutputFormat,
        PageRange, ParseOptions, ParseRequest, ParseResponse, ParseResult, ParseUsage, Priority,
        ResultType, UrlResult, registry,
    };
}

// Re-export request/response helpers.
#[doc(hidden)]
pub mod request {
    pub use docparse_request::diagnostics::from_convert_error;
    pub use docparse_request::{
        Diagnostic, DiagnosticCode, PreparedRequest, RequestBody, RequestError, RequestOptions,
        ResponseError, RetryPolicy, build_body, parse_response, parse_response_model,
        prepare_model, prepare_request,
    };
}

/// Deterministic JSON canonicalization helpers.
pub mod canonical_json;

/// Parsing model JSON strings with friendly diagnostics.
pub mod model_json;

/// Version constants.
pub mod version;

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::engine::{
        ConvertError, DumpState, EnumLiteral, Field, FieldPath, Model, ModelSchema, ModelType,
        OpenEnum, TypedValue, UploadPart, UploadResource,
    };
    pub use crate::models::{
        Block, BlockType, BoundingBox, Chunk, FullResult, JobStatus, OcrMode, OutputFormat,
        PageRange, ParseOptions, ParseRequest, ParseResponse, ParseResult, ParseUsage, Priority,
        ResultType, UrlResult, registry,
    };
    pub use crate::model_json::ModelJsonError;
    pub use crate::request::{
        Diagnostic, DiagnosticCode, PreparedRequest, RequestBody, RequestError, RequestOptions,
        ResponseError, RetryPolicy, parse_response, prepare_request,
    };
    pub use crate::{canonical_json, model_json};
}
