//! CLI binary for pdf-extract-gateway.
//!
//! Maps flags / environment to `ServiceConfig`, initialises logging and
//! serves the extraction router until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use pdf_extract_gateway::config::{
    log_filter_directive, DEFAULT_BASE_URL, DEFAULT_BIND, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MODEL,
};
use pdf_extract_gateway::{router, DocumentType, ExtractionService, GeminiClient, ServiceConfig};
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"ROUTES:
  GET  /health                          liveness, answers "Ok"
  POST /extract/invoice                 EGAT-style invoice
  POST /extract/pelng                   PELNG terminal invoice
  POST /ptt/supply/invoice              PTT supply invoice
  POST /ptt/supply/invoice-and-heat     invoice register + heat quantity
  POST /ptt/supply/b8-invoice-and-heat  B8/32 platform pack (adds totalInvoiceAmount)
  POST /ptt/tso/gas-amount              Area 2/3/4 volumes (returns volumeArea234)
  POST /ptt/tso/gas-cost                Area 1 fixed/variable service charge, flattened
  POST /ptt/inventory/terminal-cost     LNG terminal cost summary
  POST /ptt/lng/regas-sendout           total regas sendout
  POST /ptt/lng/regas-value             total regas LNG value

  Every POST takes multipart/form-data with a `file` part holding the PDF.

EXAMPLE:
  GOOGLE_GENERATIVE_AI_API_KEY=... extract-server --bind 127.0.0.1:3000
  curl -F file=@invoice.pdf http://127.0.0.1:3000/ptt/tso/gas-cost

LOGGING:
  LOG_LEVEL accepts All, Trace, Debug, Info, Warning, Error, Fatal, None
  or any tracing filter directive. RUST_LOG overrides it.
"#;

/// Serve PDF-to-JSON extraction over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "extract-server",
    version,
    about = "HTTP gateway that turns energy-sector PDF invoices into validated JSON",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Gemini API key.
    #[arg(long, env = "GOOGLE_GENERATIVE_AI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model ID, one per process.
    #[arg(long, env = "EXTRACT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Provider base URL.
    #[arg(long, env = "EXTRACT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Sampling temperature (0.0 – 2.0). Provider default when unset.
    #[arg(long, env = "EXTRACT_TEMPERATURE")]
    temperature: Option<f32>,

    /// Listen address.
    #[arg(long, env = "EXTRACT_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Largest accepted request body in bytes.
    #[arg(long, env = "EXTRACT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Log level.
    #[arg(long, env = "LOG_LEVEL", default_value = "all")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(log_filter_directive(&cli.log_level)))
                .context("Invalid LOG_LEVEL")?,
        )
        .with_writer(io::stderr)
        .init();

    let mut builder = ServiceConfig::builder()
        .model(cli.model)
        .base_url(cli.base_url)
        .bind(cli.bind)
        .max_upload_bytes(cli.max_upload_bytes);
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(t) = cli.temperature {
        builder = builder.temperature(t);
    }
    let config = builder.build().context("Invalid configuration")?;

    let client = GeminiClient::new(&config).context("Failed to create model client")?;
    let service = Arc::new(ExtractionService::new(Arc::new(client)));
    let app = router(service, config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    info!(
        "Serving {} document types with {} on http://{}",
        DocumentType::ALL.len(),
        config.model,
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
