//! # pdf-extract-gateway
//!
//! Turn energy-sector PDF invoices and reports into schema-validated JSON
//! using a hosted multimodal model.
//!
//! ## Why this crate?
//!
//! The documents (EGAT and PELNG invoices, PTT supply / TSO / inventory / LNG
//! statements) mix Thai and English, scanned tables and summary boxes.
//! Instead of parsing the PDF ourselves, the whole file is sent inline to
//! Gemini together with a per-document prompt and response schema. What comes
//! back is validated against that same schema before anyone sees it, and a few
//! document types get a small deterministic post-processing step.
//!
//! ## Pipeline Overview
//!
//! ```text
//! multipart upload
//!  │
//!  ├─ 1. Catalog   DocumentType → (system prompt, Schema, Adapter)
//!  ├─ 2. Model     one generateContent call, PDF inline as base64
//!  ├─ 3. Decode    model text → JSON (fences / prose tolerated)
//!  ├─ 4. Validate  strip unknown keys, fill defaults, check types and bounds
//!  ├─ 5. Adapt     sums and flattening for PTT TSO / B8 documents
//!  └─ 6. Respond   200 JSON, or 500 ExtractionFailure / 422 rejection
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_extract_gateway::{router, ExtractionService, GeminiClient, ServiceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::builder()
//!         .api_key(std::env::var("GOOGLE_GENERATIVE_AI_API_KEY")?)
//!         .build()?;
//!     let client = GeminiClient::new(&config)?;
//!     let service = Arc::new(ExtractionService::new(Arc::new(client)));
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind).await?;
//!     axum::serve(listener, router(service, config.max_upload_bytes)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `extract-server` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod server;
pub mod service;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use adapters::Adapter;
pub use catalog::{Catalog, DocumentSpec, DocumentType};
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::{
    ConfigError, ExtractionFailure, FailureCause, ValidationError, ValidationIssue,
    EXTRACTION_FAILURE_TAG,
};
pub use model::{GeminiClient, ModelClient};
pub use schema::{Field, Schema, SchemaKind};
pub use server::{router, AppState, RequestRejection};
pub use service::ExtractionService;
