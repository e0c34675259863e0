//! Error types for the extraction gateway.
//!
//! Two families of error live here:
//!
//! * [`ExtractionFailure`]: the single failure kind produced by the
//!   extraction pipeline. Callers match on this one type and render it
//!   uniformly; the nested [`FailureCause`] says *why* it failed (bad input,
//!   network, undecodable model output, schema mismatch) without changing
//!   the external contract.
//!
//! * [`ConfigError`]: startup-time problems with [`crate::ServiceConfig`].
//!   These never reach an HTTP client.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Tag carried by every [`ExtractionFailure`] in its serialised form.
pub const EXTRACTION_FAILURE_TAG: &str = "ExtractPDF/Process/Error";

/// The one failure a caller of the extraction pipeline ever sees.
///
/// `message` is human-readable and never empty; `cause` is the root cause,
/// opaque to HTTP clients but matchable in Rust.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExtractionFailure {
    pub message: String,
    #[source]
    pub cause: FailureCause,
}

impl ExtractionFailure {
    pub fn new(message: impl Into<String>, cause: FailureCause) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = cause.to_string();
        }
        Self { message, cause }
    }

    /// Upload or request arguments unusable before the model is contacted.
    pub fn input(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(
            format!("Invalid extraction input: {detail}"),
            FailureCause::Input(detail),
        )
    }

    /// Network failure or non-success HTTP status from the provider.
    pub fn transport(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(
            format!("Model request failed: {detail}"),
            FailureCause::Transport(detail),
        )
    }

    /// The provider answered but its output could not be turned into JSON.
    pub fn decode(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(
            format!("Model output could not be decoded: {detail}"),
            FailureCause::Decode(detail),
        )
    }

    /// The decoded JSON does not satisfy the declared schema.
    pub fn validation(err: ValidationError) -> Self {
        Self::new(
            format!("Model output failed schema validation: {err}"),
            FailureCause::Validation(err),
        )
    }

    /// Short machine-readable name of the root cause.
    pub fn kind(&self) -> &'static str {
        self.cause.kind()
    }

    /// The opaque `error` payload rendered next to `message` at the boundary.
    pub fn error_payload(&self) -> FailurePayload {
        FailurePayload {
            tag: EXTRACTION_FAILURE_TAG,
            kind: self.kind(),
            detail: self.cause.to_string(),
        }
    }
}

/// Root cause of an [`ExtractionFailure`].
#[derive(Debug, Error)]
pub enum FailureCause {
    /// Empty upload, unreadable multipart stream, or empty prompt.
    #[error("invalid input: {0}")]
    Input(String),

    /// Connection error, TLS error, or non-2xx status from the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// Prompt blocked, no candidates, or text that is not JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// JSON was produced but violates the schema.
    #[error("validation error: {0}")]
    Validation(ValidationError),
}

impl FailureCause {
    pub fn kind(&self) -> &'static str {
        match self {
            FailureCause::Input(_) => "input",
            FailureCause::Transport(_) => "transport",
            FailureCause::Decode(_) => "decode",
            FailureCause::Validation(_) => "validation",
        }
    }
}

/// Serialised form of a failure cause.
#[derive(Debug, Clone, Serialize)]
pub struct FailurePayload {
    #[serde(rename = "_tag")]
    pub tag: &'static str,
    pub kind: &'static str,
    pub detail: String,
}

// ── Validation ───────────────────────────────────────────────────────────

/// Every way a JSON value violated a schema, collected in one pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => write!(f, "no issues"),
            [one] => write!(f, "{one}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

/// One schema violation at a JSON path such as `$.invoices[2].amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

// ── Configuration ────────────────────────────────────────────────────────

/// Configuration rejected by [`crate::config::ServiceConfigBuilder::build`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Model provider API key is missing.\nSet GOOGLE_GENERATIVE_AI_API_KEY or pass --api-key.")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_falls_back_to_cause() {
        let f = ExtractionFailure::new("  ", FailureCause::Transport("connection reset".into()));
        assert!(f.message.contains("connection reset"), "got: {}", f.message);
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(ExtractionFailure::input("x").kind(), "input");
        assert_eq!(ExtractionFailure::transport("x").kind(), "transport");
        assert_eq!(ExtractionFailure::decode("x").kind(), "decode");
        let v = ValidationError { issues: vec![] };
        assert_eq!(ExtractionFailure::validation(v).kind(), "validation");
    }

    #[test]
    fn payload_carries_tag() {
        let payload = ExtractionFailure::decode("no candidates").error_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["_tag"], EXTRACTION_FAILURE_TAG);
        assert_eq!(json["kind"], "decode");
        assert!(json["detail"].as_str().unwrap().contains("no candidates"));
    }

    #[test]
    fn validation_display_summarises() {
        let err = ValidationError {
            issues: vec![
                ValidationIssue {
                    path: "$.a".into(),
                    message: "expected number, got string".into(),
                },
                ValidationIssue {
                    path: "$.b".into(),
                    message: "required field is missing".into(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("$.a: expected number"), "got: {msg}");
        assert!(msg.contains("1 more"), "got: {msg}");
    }
}
