//! Outbound side: dump a request model and decide its retry budget.

use docparse_core::{DumpState, Model, ModelType, UploadPart};
use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::options::{RequestOptions, RetryPolicy};

/// A dumped request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// JSON body, or the non-file form fields when `uploads` is non-empty.
    pub json: Value,
    pub uploads: Vec<UploadPart>,
    /// False when the body consumed a one-shot upload and cannot be rebuilt.
    pub can_retry: bool,
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        !self.uploads.is_empty()
    }
}

/// Everything the transport needs to send one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub body: RequestBody,
    pub max_retries: u32,
    pub timeout_ms: Option<u64>,
}

/// Dump a typed request model and merge `extra_body` over its top level.
pub fn build_body<T: ModelType>(
    model: &T,
    extra_body: &Map<String, Value>,
) -> Result<RequestBody, RequestError> {
    let mut state = DumpState::new();
    let json = model.dump_with(&mut state)?;
    Ok(finish_body(json, state, extra_body))
}

/// Build the body and resolve the retry budget for a typed request model.
pub fn prepare_request<T: ModelType>(
    model: &T,
    options: &RequestOptions,
    policy: &RetryPolicy,
) -> Result<PreparedRequest, RequestError> {
    let body = build_body(model, &options.extra_body)?;
    Ok(resolve(T::schema().name(), body, options, policy))
}

/// Same as [`prepare_request`] for an untyped [`Model`].
pub fn prepare_model(
    model: &Model,
    options: &RequestOptions,
    policy: &RetryPolicy,
) -> Result<PreparedRequest, RequestError> {
    let mut state = DumpState::new();
    let json = model.dump(&mut state)?;
    let body = finish_body(json, state, &options.extra_body);
    Ok(resolve(model.schema().name(), body, options, policy))
}

fn finish_body(mut json: Value, state: DumpState, extra_body: &Map<String, Value>) -> RequestBody {
    if let Value::Object(obj) = &mut json {
        for (key, value) in extra_body {
            obj.insert(key.clone(), value.clone());
        }
    }
    let (can_retry, uploads) = state.finish();
    RequestBody {
        json,
        uploads,
        can_retry,
    }
}

fn resolve(
    model: &str,
    body: RequestBody,
    options: &RequestOptions,
    policy: &RetryPolicy,
) -> PreparedRequest {
    let requested = options.max_retries.unwrap_or(policy.max_retries);
    let max_retries = if body.can_retry {
        requested
    } else {
        if requested > 0 {
            tracing::warn!(
                model,
                requested,
                "request body consumed a one-shot upload; retries disabled"
            );
        }
        0
    };

    PreparedRequest {
        body,
        max_retries,
        timeout_ms: options.timeout_ms,
    }
}
