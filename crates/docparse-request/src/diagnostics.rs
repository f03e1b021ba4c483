use docparse_core::ConvertError;
use serde::{Deserialize, Serialize};

/// Stable, machine-readable codes for conversion failures.
///
/// These codes are intended for programmatic handling (CI, tooling, UI), while
/// `message` remains human-oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    MissingRequiredField,
    UnexpectedNull,
    TypeMismatch,
    /// No union variant accepted the value. Followed by one diagnostic per
    /// variant carrying that variant's failure.
    UnionExhausted,
    UnresumableResource,
    ResourceRead,
    UnknownField,
    /// Response bytes were not JSON at all.
    InvalidJson,
}

/// A single conversion diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// Path such as `result.chunks[0].blocks[2].bbox`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Union variant this diagnostic belongs to, for per-variant failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, path: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            variant: None,
            message: message.into(),
        }
    }
}

fn code_of(err: &ConvertError) -> DiagnosticCode {
    match err {
        ConvertError::MissingRequiredField { .. } => DiagnosticCode::MissingRequiredField,
        ConvertError::UnexpectedNull { .. } => DiagnosticCode::UnexpectedNull,
        ConvertError::TypeMismatch { .. } => DiagnosticCode::TypeMismatch,
        ConvertError::UnionExhausted { .. } => DiagnosticCode::UnionExhausted,
        ConvertError::UnresumableResource { .. } => DiagnosticCode::UnresumableResource,
        ConvertError::ResourceRead { .. } => DiagnosticCode::ResourceRead,
        ConvertError::UnknownField { .. } => DiagnosticCode::UnknownField,
    }
}

/// Flatten a conversion error into diagnostics, depth first.
///
/// A `UnionExhausted` yields its own entry followed by the flattened failure
/// of each variant, tagged with the variant name.
pub fn from_convert_error(err: &ConvertError) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    push_flattened(err, None, &mut out);
    out
}

fn push_flattened(err: &ConvertError, variant: Option<&str>, out: &mut Vec<Diagnostic>) {
    let path = match err {
        ConvertError::UnknownField { .. } => None,
        other => Some(other.path().to_string()),
    };
    let message = match err {
        ConvertError::UnionExhausted { union, path, .. } => {
            format!("no variant of {union} matched at `{path}`")
        }
        other => other.to_string(),
    };
    out.push(Diagnostic {
        code: code_of(err),
        path,
        variant: variant.map(str::to_string),
        message,
    });

    if let ConvertError::UnionExhausted { failures, .. } = err {
        for failure in failures {
            push_flattened(&failure.error, Some(&failure.variant), out);
        }
    }
}
