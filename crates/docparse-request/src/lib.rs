#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the docparse client.

Do NOT depend on this crate directly.
Use `docparse-io` instead.
"#]

pub mod diagnostics;
pub mod error;
pub mod options;
pub mod prepare;
pub mod response;

pub use diagnostics::{Diagnostic, DiagnosticCode};
pub use error::{RequestError, ResponseError};
pub use options::{RequestOptions, RetryPolicy};
pub use prepare::{PreparedRequest, RequestBody, build_body, prepare_model, prepare_request};
pub use response::{parse_response, parse_response_model};
