//! Diagnostic configuration
//!
//! Every field is optional. Missing locations fall back to the same defaults
//! the map client uses.

mod sources;

pub use sources::{ConfigSource, ENV_API_URL, ENV_BASE_URL, ENV_TEXTURE_PATH, ENV_TIMEOUT_MS};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Texture probed when none is configured
pub const DEFAULT_TEXTURE_PATH: &str = "path/to/texture.png";
/// Status endpoint probed when none is configured
pub const DEFAULT_API_URL: &str = "/api/status";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Diagnostic run configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiagnosticConfig {
    /// Texture to probe for loadability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_path: Option<String>,
    /// Backend endpoint to probe for reachability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Origin relative locations are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-probe timeout (milliseconds); unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl DiagnosticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture_path(mut self, texture_path: impl Into<String>) -> Self {
        self.texture_path = Some(texture_path.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Texture location, or the default placeholder
    pub fn texture_path(&self) -> &str {
        self.texture_path.as_deref().unwrap_or(DEFAULT_TEXTURE_PATH)
    }

    /// Status endpoint, or the default relative path
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = self.base_url.as_deref() else {
            return Ok(None);
        };
        let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(Some(url))
    }

    /// Check the configuration before a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("texturePath", &self.texture_path),
            ("apiUrl", &self.api_url),
            ("baseUrl", &self.base_url),
        ];
        for (name, value) in fields {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::EmptyField(name));
            }
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        self.base_url()?;
        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: DiagnosticConfig) -> Self {
        Self {
            texture_path: other.texture_path.or(self.texture_path),
            api_url: other.api_url.or(self.api_url),
            base_url: other.base_url.or(self.base_url),
            request_timeout_ms: other.request_timeout_ms.or(self.request_timeout_ms),
        }
    }
}
