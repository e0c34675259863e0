//! Rendering of failures at the HTTP boundary.

use crate::error::ExtractionFailure;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

/// The upload was rejected before extraction started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRejection {
    pub status: StatusCode,
    pub message: String,
}

impl RequestRejection {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    /// Oversized bodies keep their 413; every other stream error is a 422.
    pub fn from_multipart(err: MultipartError) -> Self {
        let status = match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            message: format!("Failed to read multipart body: {}", err.body_text()),
        }
    }
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        debug!("Rejected upload ({}): {}", self.status, self.message);
        let body = json!({
            "message": self.message,
            "status": self.status.as_u16().to_string(),
        });
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for ExtractionFailure {
    fn into_response(self) -> Response {
        error!("{}: {}", self.kind(), self);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = json!({
            "message": self.message,
            "error": self.error_payload(),
            "status": status.as_u16().to_string(),
        });
        (status, Json(body)).into_response()
    }
}
