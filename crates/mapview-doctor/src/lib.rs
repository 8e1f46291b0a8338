//! MapView Doctor
//!
//! Environment diagnostics for web map clients: checks that a WebGL context
//! can be acquired, that textures load and that the backend answers, then
//! suggests remediation for whatever failed.
//!
//! ```rust,ignore
//! use mapview_doctor::{apply_remediation, DiagnosticConfig, DiagnosticRunner};
//!
//! let config = DiagnosticConfig::new().with_base_url("https://maps.example.com");
//! let runner = DiagnosticRunner::native(&config)?;
//! let findings = runner.run(&config).await;
//! let findings = apply_remediation(findings).await;
//! ```

pub mod config;
pub mod diagnostics;
pub mod network;

pub use config::{ConfigError, DiagnosticConfig};
pub use diagnostics::{
    apply_remediation, run_diagnostics, Component, DiagnosticReport, DiagnosticRunner, Finding,
    FindingKind,
};
