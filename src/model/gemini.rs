//! Gemini `generateContent` client.
//!
//! One POST per extraction:
//!
//! ```text
//! POST {base_url}/models/{model}:generateContent
//! x-goog-api-key: <key>
//!
//! { systemInstruction: { parts: [{ text: <prompt> }] },
//!   contents: [{ role: "user", parts: [{ inlineData: { mimeType: "application/pdf", data: <b64> } }] }],
//!   generationConfig: { responseMimeType: "application/json", responseSchema: <schema> } }
//! ```
//!
//! The PDF travels inline rather than through the Files API, so there is no
//! upload/delete lifecycle to manage and nothing outlives the request.
//! No timeout is set on the HTTP client and no call is ever retried.

use super::json::{parse_model_json, snippet};
use super::ModelClient;
use crate::config::ServiceConfig;
use crate::error::{ConfigError, ExtractionFailure};
use crate::schema::Schema;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

const PDF_MIME_TYPE: &str = "application/pdf";

/// Client for a single Gemini model.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    /// Build a client from the process configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/models/{}:generateContent", config.base_url, config.model),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(
        &self,
        file_bytes: &[u8],
        system_prompt: &'a str,
        schema: &Schema,
    ) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text(system_prompt)],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part::InlineData(Blob {
                    mime_type: PDF_MIME_TYPE,
                    data: STANDARD.encode(file_bytes),
                })],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema.to_response_schema(),
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_structured(
        &self,
        file_bytes: &[u8],
        system_prompt: &str,
        schema: &Schema,
    ) -> Result<Value, ExtractionFailure> {
        let start = Instant::now();
        let body = self.build_request(file_bytes, system_prompt, schema);

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionFailure::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("{}: provider returned HTTP {}", self.model, status);
            return Err(ExtractionFailure::transport(format!(
                "HTTP {}: {}",
                status,
                snippet(text.trim(), 500)
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExtractionFailure::decode(format!("unreadable provider response: {e}")))?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "{}: {} input tokens, {} output tokens, {:?}",
                self.model,
                usage.prompt_token_count,
                usage.candidates_token_count,
                start.elapsed()
            );
        }

        let text = parsed.into_text()?;
        let value = parse_model_json(&text).ok_or_else(|| {
            ExtractionFailure::decode(format!("model text is not JSON: {}", snippet(&text, 200)))
        })?;

        schema.validate(&value).map_err(ExtractionFailure::validation)
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(Blob),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or the reason there is none.
    fn into_text(self) -> Result<String, ExtractionFailure> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ExtractionFailure::decode(format!("prompt blocked: {reason}")));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ExtractionFailure::decode("provider returned no candidates"))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(ExtractionFailure::decode(format!(
                "empty model response (finish reason: {reason})"
            )));
        }
        Ok(text)
    }
}
