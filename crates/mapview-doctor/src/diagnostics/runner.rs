//! Diagnostic runner
//!
//! Runs the graphics check first, then the texture and backend checks
//! concurrently. Each check returns its finding by value and the results
//! are assembled after both complete, so the output order is fixed:
//! graphics context, texture load, backend.

use super::checker::DiagnosticChecker;
use super::finding::{Finding, FindingKind};
use super::probes::{
    GraphicsContextProvider, HttpClient, ImageResourceLoader, PlatformGraphicsProvider,
    ReqwestHttpClient, ResourceLoader,
};
use crate::config::{ConfigError, DiagnosticConfig};
use std::sync::Arc;
use tracing::{info, instrument};

/// Diagnostic runner
///
/// Holds the injected capabilities; cheap to clone.
#[derive(Clone)]
pub struct DiagnosticRunner {
    graphics: Arc<dyn GraphicsContextProvider>,
    loader: Arc<dyn ResourceLoader>,
    http: Arc<dyn HttpClient>,
}

impl DiagnosticRunner {
    pub fn new<G, L, H>(graphics: G, loader: L, http: H) -> Self
    where
        G: GraphicsContextProvider + 'static,
        L: ResourceLoader + 'static,
        H: HttpClient + 'static,
    {
        Self::from_shared(Arc::new(graphics), Arc::new(loader), Arc::new(http))
    }

    pub fn from_shared(
        graphics: Arc<dyn GraphicsContextProvider>,
        loader: Arc<dyn ResourceLoader>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            graphics,
            loader,
            http,
        }
    }

    /// Runner backed by the platform graphics probe and a reqwest client
    pub fn native(config: &DiagnosticConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;
        let http =
            ReqwestHttpClient::new(base_url).map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let loader = ImageResourceLoader::new(http.clone());

        Ok(Self::new(PlatformGraphicsProvider::new(), loader, http))
    }

    /// Run every check and return one finding per component
    #[instrument(skip_all, fields(texture = config.texture_path(), api = config.api_url()))]
    pub async fn run(&self, config: &DiagnosticConfig) -> Vec<Finding> {
        let timeout = config.request_timeout();

        let graphics = DiagnosticChecker::check_graphics_context(self.graphics.as_ref());

        let (texture, backend) = tokio::join!(
            DiagnosticChecker::check_texture_load(
                self.loader.as_ref(),
                config.texture_path(),
                timeout
            ),
            DiagnosticChecker::check_backend(self.http.as_ref(), config.api_url(), timeout),
        );

        let findings = vec![graphics, texture, backend];
        info!(
            succeeded = count(&findings, FindingKind::Success),
            errors = count(&findings, FindingKind::Error),
            critical = count(&findings, FindingKind::CriticalError),
            "diagnostics finished"
        );
        findings
    }
}

fn count(findings: &[Finding], kind: FindingKind) -> usize {
    findings.iter().filter(|f| f.kind() == kind).count()
}

/// Run the diagnostics with `runner`
pub async fn run_diagnostics(runner: &DiagnosticRunner, config: &DiagnosticConfig) -> Vec<Finding> {
    runner.run(config).await
}
