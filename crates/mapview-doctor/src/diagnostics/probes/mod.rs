//! Environment probes
//!
//! Capability interfaces the runner depends on, plus native implementations.
//! Tests swap in fakes so no real GPU, network or filesystem is needed.

mod graphics;
mod http;
mod loader;

pub use graphics::PlatformGraphicsProvider;
pub use http::ReqwestHttpClient;
pub use loader::{sniff_image_format, ImageFormat, ImageResourceLoader};

use crate::network::TimeoutError;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Probe errors
///
/// Never surfaced to runner callers; rendered into a finding's `cause`.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Request could not be sent or no response was received
    #[error("transport error: {0}")]
    Transport(String),

    /// Response received with a non-success status
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Local resource could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource loaded but is not a recognised image
    #[error("resource is not a supported image: {0}")]
    NotAnImage(String),

    /// Probe exceeded the configured timeout
    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// Context flavor not supported by the provider
    #[error("unsupported context: {0}")]
    Unsupported(String),

    /// Platform query failed
    #[error("platform error: {0}")]
    Platform(String),
}

/// Requested drawing context flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextFlavor {
    WebGl,
    /// Legacy alias still exposed by some browsers
    ExperimentalWebGl,
}

impl ContextFlavor {
    /// Acquisition order: standard name first, then the legacy alias
    pub const PREFERENCE: [ContextFlavor; 2] =
        [ContextFlavor::WebGl, ContextFlavor::ExperimentalWebGl];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextFlavor::WebGl => "webgl",
            ContextFlavor::ExperimentalWebGl => "experimental-webgl",
        }
    }
}

impl fmt::Display for ContextFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An acquired drawing context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsContext {
    pub flavor: ContextFlavor,
    /// Renderer description reported by the platform
    pub renderer: String,
}

/// A successfully loaded image resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedResource {
    pub location: String,
    pub format: ImageFormat,
    pub size: usize,
}

/// Minimal HTTP response view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
}

impl HttpResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Drawing surface / graphics context capability
///
/// Each call represents a freshly created off-screen surface.
#[cfg_attr(test, mockall::automock)]
pub trait GraphicsContextProvider: Send + Sync {
    /// Try to acquire a context. `Ok(None)` means the platform has no such context.
    fn acquire_context(&self, flavor: ContextFlavor)
        -> Result<Option<GraphicsContext>, ProbeError>;
}

/// Image resource loading capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load(&self, location: &str) -> Result<LoadedResource, ProbeError>;
}

/// HTTP capability
///
/// Transport failures are errors; any received response, whatever its
/// status, is `Ok`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_is_success() {
        assert!(HttpResponse { status: 200 }.is_success());
        assert!(HttpResponse { status: 204 }.is_success());
        assert!(!HttpResponse { status: 301 }.is_success());
        assert!(!HttpResponse { status: 404 }.is_success());
        assert!(!HttpResponse { status: 503 }.is_success());
    }

    #[test]
    fn test_context_flavor_names() {
        assert_eq!(ContextFlavor::WebGl.to_string(), "webgl");
        assert_eq!(
            ContextFlavor::ExperimentalWebGl.to_string(),
            "experimental-webgl"
        );
        assert_eq!(ContextFlavor::PREFERENCE[0], ContextFlavor::WebGl);
    }

    #[test]
    fn test_probe_error_display() {
        let err = ProbeError::Status(404);
        assert_eq!(err.to_string(), "unexpected HTTP status 404");

        let err = ProbeError::from(TimeoutError { timeout_ms: 500 });
        assert_eq!(err.to_string(), "Operation timed out after 500ms");
    }
}
