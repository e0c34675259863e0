//! Extraction orchestration.
//!
//! [`ExtractionService`] is the one place that turns file bytes into a
//! validated value: it checks the input, calls the [`ModelClient`] exactly
//! once, re-validates the answer and, for catalog lookups, runs the entry's
//! adapter. It holds no mutable state and is shared across requests behind
//! an `Arc`.

use crate::catalog::{Catalog, DocumentType};
use crate::error::ExtractionFailure;
use crate::model::ModelClient;
use crate::schema::Schema;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

pub struct ExtractionService {
    client: Arc<dyn ModelClient>,
    catalog: &'static Catalog,
}

impl ExtractionService {
    /// Service over the built-in catalog.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self::with_catalog(client, Catalog::builtin())
    }

    pub fn with_catalog(client: Arc<dyn ModelClient>, catalog: &'static Catalog) -> Self {
        Self { client, catalog }
    }

    pub fn model_id(&self) -> &str {
        self.client.model_id()
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Extract structured data from a PDF held in memory.
    ///
    /// The returned value always satisfies `schema`, whichever
    /// [`ModelClient`] produced it.
    pub async fn process_inline(
        &self,
        file_bytes: &[u8],
        system_prompt: &str,
        schema: &Schema,
    ) -> Result<Value, ExtractionFailure> {
        if file_bytes.is_empty() {
            return Err(ExtractionFailure::input("uploaded file is empty"));
        }
        if system_prompt.trim().is_empty() {
            return Err(ExtractionFailure::input("system prompt is empty"));
        }

        let raw = self
            .client
            .generate_structured(file_bytes, system_prompt, schema)
            .await?;

        schema.validate(&raw).map_err(ExtractionFailure::validation)
    }

    /// Extract a catalog document type and apply its adapter.
    pub async fn extract(
        &self,
        doc: DocumentType,
        file_bytes: &[u8],
    ) -> Result<Value, ExtractionFailure> {
        let span = info_span!("extract", doc = %doc, bytes = file_bytes.len());
        async move {
            let start = Instant::now();
            let result = self.run(doc, file_bytes).await;
            match &result {
                Ok(_) => info!(
                    "{} extracted with {} in {:?}",
                    doc,
                    self.model_id(),
                    start.elapsed()
                ),
                Err(e) => warn!("{} failed ({}): {}", doc, e.kind(), e),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, doc: DocumentType, file_bytes: &[u8]) -> Result<Value, ExtractionFailure> {
        let spec = self
            .catalog
            .get(doc)
            .ok_or_else(|| ExtractionFailure::input(format!("no catalog entry for '{doc}'")))?;

        let value = self
            .process_inline(file_bytes, spec.system_prompt, &spec.schema)
            .await?;
        spec.adapter.apply(value)
    }
}
