//! Process-wide configuration for the extraction gateway.
//!
//! Everything the model client and HTTP server need lives in one immutable
//! [`ServiceConfig`], built once at startup through [`ServiceConfigBuilder`]
//! and passed by reference into [`crate::model::GeminiClient::new`]. Nothing
//! reads the environment after that point.

use crate::error::ConfigError;
use std::fmt;
use std::net::SocketAddr;

/// Default Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default base URL of the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Default cap on an uploaded PDF, matching the provider's inline-data limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Immutable configuration shared by every request.
///
/// # Example
/// ```rust
/// use pdf_extract_gateway::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .api_key("test-key")
///     .model("gemini-2.5-pro")
///     .build()
///     .unwrap();
/// assert_eq!(config.model, "gemini-2.5-pro");
/// ```
#[derive(Clone)]
pub struct ServiceConfig {
    /// Model-provider API key. Never logged.
    pub api_key: String,

    /// Model identifier, e.g. "gemini-2.5-flash". One per process.
    pub model: String,

    /// Provider base URL without trailing slash.
    pub base_url: String,

    /// Sampling temperature. `None` leaves the provider default in place.
    pub temperature: Option<f32>,

    /// Address the HTTP server listens on.
    pub bind: SocketAddr,

    /// Largest request body accepted on extraction routes, in bytes.
    pub max_upload_bytes: usize,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("bind", &self.bind)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a new builder. Only the API key has no default.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    bind: String,
    max_upload_bytes: usize,
}

impl ServiceConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t.clamp(0.0, 2.0));
        self
    }

    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.bind = addr.into();
        self
    }

    pub fn max_upload_bytes(mut self, n: usize) -> Self {
        self.max_upload_bytes = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = self.model.trim().to_string();
        if model.is_empty() {
            return Err(ConfigError::Invalid("model id must not be empty".into()));
        }

        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        let bind: SocketAddr = self.bind.parse().map_err(|e| {
            ConfigError::Invalid(format!("bind address '{}' is invalid: {e}", self.bind))
        })?;

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max upload size must be ≥ 1 byte".into(),
            ));
        }

        Ok(ServiceConfig {
            api_key,
            model,
            base_url,
            temperature: self.temperature,
            bind,
            max_upload_bytes: self.max_upload_bytes,
        })
    }
}

/// Translate a `LOG_LEVEL` value into an `EnvFilter` directive.
///
/// Accepts the level names the service has always used (`All`, `Trace`,
/// `Debug`, `Info`, `Warning`, `Error`, `Fatal`, `None`) in any case.
/// Anything else is assumed to already be a filter directive such as
/// `pdf_extract_gateway=debug,tower_http=info` and is passed through.
pub fn log_filter_directive(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "" | "all" | "trace" => "trace".to_string(),
        "debug" => "debug".to_string(),
        "info" => "info".to_string(),
        "warning" | "warn" => "warn".to_string(),
        "error" | "fatal" => "error".to_string(),
        "none" | "off" => "off".to_string(),
        _ => level.trim().to_string(),
    }
}
