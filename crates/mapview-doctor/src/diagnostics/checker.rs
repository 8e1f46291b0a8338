//! Diagnostic checks
//!
//! Each check converts every failure into a [`Finding`]; none of them return
//! errors to the caller.

use super::finding::{Component, Finding};
use super::probes::{ContextFlavor, GraphicsContextProvider, HttpClient, ProbeError, ResourceLoader};
use crate::network::with_optional_timeout;
use std::time::Duration;
use tracing::{debug, warn};

pub const WEBGL_UNAVAILABLE_REMEDY: &str =
    "Check that the browser supports WebGL and that it is enabled";
pub const TEXTURE_REMEDY: &str = "Check texture paths and CORS permissions";
pub const BACKEND_STATUS_REMEDY: &str = "Check connectivity and API configuration";
pub const BACKEND_UNREACHABLE_REMEDY: &str = "Check that the server is online and reachable";

/// Diagnostic checker
pub struct DiagnosticChecker;

impl DiagnosticChecker {
    /// Check that a WebGL drawing context can be acquired
    ///
    /// Asks for `webgl` first and falls back to `experimental-webgl`.
    pub fn check_graphics_context(provider: &dyn GraphicsContextProvider) -> Finding {
        for flavor in ContextFlavor::PREFERENCE {
            match provider.acquire_context(flavor) {
                Ok(Some(context)) => {
                    debug!(%flavor, renderer = %context.renderer, "graphics context acquired");
                    return Finding::success(
                        Component::GraphicsContext,
                        format!("WebGL available ({}, {})", context.flavor, context.renderer),
                    );
                }
                Ok(None) => debug!(%flavor, "no graphics context"),
                Err(e) => {
                    warn!(%flavor, error = %e, "graphics context acquisition failed");
                    return Finding::critical(
                        Component::GraphicsContext,
                        "Failed to initialize WebGL",
                    )
                    .with_cause(e);
                }
            }
        }

        Finding::critical(Component::GraphicsContext, "WebGL is not available")
            .with_remedy(WEBGL_UNAVAILABLE_REMEDY)
    }

    /// Check that the texture at `location` loads as an image
    pub async fn check_texture_load(
        loader: &dyn ResourceLoader,
        location: &str,
        timeout: Option<Duration>,
    ) -> Finding {
        let result = with_optional_timeout(loader.load(location), timeout)
            .await
            .map_err(ProbeError::from)
            .and_then(|loaded| loaded);

        match result {
            Ok(resource) => {
                debug!(location, format = %resource.format, size = resource.size, "texture loaded");
                Finding::success(Component::TextureLoad, "Texture loading OK")
            }
            Err(e) => {
                // an image load failure carries no error object, only the event
                warn!(location, error = %e, "texture load failed");
                Finding::error(Component::TextureLoad, "Texture loading failed")
                    .with_remedy(TEXTURE_REMEDY)
            }
        }
    }

    /// Check that the backend status endpoint answers with a success status
    pub async fn check_backend(
        client: &dyn HttpClient,
        url: &str,
        timeout: Option<Duration>,
    ) -> Finding {
        let result = with_optional_timeout(client.get(url), timeout)
            .await
            .map_err(ProbeError::from)
            .and_then(|response| response);

        match result {
            Ok(response) if response.is_success() => {
                debug!(url, status = response.status, "backend reachable");
                Finding::success(
                    Component::Backend,
                    format!("Backend reachable (HTTP {})", response.status),
                )
            }
            Ok(response) => {
                warn!(url, status = response.status, "backend returned error status");
                Finding::error(
                    Component::Backend,
                    format!("Error communicating with the server (HTTP {})", response.status),
                )
                .with_remedy(BACKEND_STATUS_REMEDY)
            }
            Err(e) => {
                warn!(url, error = %e, "backend request failed");
                Finding::error(Component::Backend, "Failed to connect to the server")
                    .with_cause(e)
                    .with_remedy(BACKEND_UNREACHABLE_REMEDY)
            }
        }
    }
}
