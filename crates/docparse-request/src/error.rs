use docparse_core::ConvertError;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticCode, from_convert_error};

/// Building a request body failed.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to build request body: {0}")]
    Dump(#[from] ConvertError),
}

impl RequestError {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            RequestError::Dump(err) => from_convert_error(err),
        }
    }
}

/// Turning response bytes into a typed model failed.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response does not match schema: {0}")]
    Conversion(#[from] ConvertError),
}

impl ResponseError {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ResponseError::InvalidJson(err) => vec![Diagnostic::new(
                DiagnosticCode::InvalidJson,
                None,
                err.to_string(),
            )],
            ResponseError::Conversion(err) => from_convert_error(err),
        }
    }
}
