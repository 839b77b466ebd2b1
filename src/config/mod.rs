// src/config/mod.rs
// Environment-based configuration - read once at startup, immutable afterwards

use tracing::debug;

use crate::error::TriageError;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Process-wide configuration for the triage service.
///
/// Resolved once in `main` and passed down explicitly; nothing re-reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Gemini API key (GEMINI_API_KEY, falling back to GOOGLE_API_KEY)
    pub api_key: String,
    /// Model used for classification (TRIAGE_MODEL)
    pub model: String,
    /// Gemini API base URL (TRIAGE_GEMINI_BASE_URL, overridable for tests)
    pub base_url: String,
    /// Bind host (TRIAGE_HOST)
    pub host: String,
    /// Bind port (TRIAGE_PORT)
    pub port: u16,
}

impl TriageConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails fast with a `Config` error when no API key is set; every request
    /// would fail individually otherwise.
    pub fn from_env() -> Result<Self, TriageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, but reading through a lookup closure so tests do
    /// not have to mutate process-global environment variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TriageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_key = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = read_key("GEMINI_API_KEY")
            .or_else(|| read_key("GOOGLE_API_KEY"))
            .ok_or_else(|| {
                TriageError::Config(
                    "GEMINI_API_KEY (or GOOGLE_API_KEY) is not set; refusing to start".to_string(),
                )
            })?;

        let port = match read_key("TRIAGE_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                TriageError::Config(format!("TRIAGE_PORT is not a valid port: {raw}"))
            })?,
            None => DEFAULT_PORT,
        };

        let config = Self {
            api_key,
            model: read_key("TRIAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: read_key("TRIAGE_GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            host: read_key("TRIAGE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        };
        debug!(model = %config.model, host = %config.host, port = config.port, "configuration loaded");
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
