//! Model clients: one call to a hosted generative model per extraction.
//!
//! [`ModelClient`] is the seam between the pipeline and the provider. The
//! production implementation is [`GeminiClient`]; tests plug in stubs that
//! return canned JSON or failures.
//!
//! ## Data Flow
//!
//! ```text
//! PDF bytes ──▶ base64 inline part ─┐
//! system prompt ────────────────────┼──▶ generateContent ──▶ text ──▶ json ──▶ validate
//! Schema ──▶ responseSchema ────────┘
//! ```

pub mod gemini;
pub mod json;

pub use gemini::GeminiClient;

use crate::error::ExtractionFailure;
use crate::schema::Schema;
use async_trait::async_trait;
use serde_json::Value;

/// Generate structured output from a document.
///
/// Implementations make exactly one provider call, never retry, and never
/// panic across this boundary: every problem becomes an
/// [`ExtractionFailure`]. On `Ok` the value conforms to `schema`.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Identifier of the single configured model.
    fn model_id(&self) -> &str;

    async fn generate_structured(
        &self,
        file_bytes: &[u8],
        system_prompt: &str,
        schema: &Schema,
    ) -> Result<Value, ExtractionFailure>;
}
