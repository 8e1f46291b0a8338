//! Diagnostics
//!
//! Graphics, texture and backend checks for a map client, plus the
//! remediation pass and reporting.

mod checker;
mod finding;
mod health;
pub mod probes;
mod remediation;
mod report;
mod runner;

pub use checker::{
    DiagnosticChecker, BACKEND_STATUS_REMEDY, BACKEND_UNREACHABLE_REMEDY, TEXTURE_REMEDY,
    WEBGL_UNAVAILABLE_REMEDY,
};
pub use finding::{Component, Finding, FindingKind};
pub use health::{HealthStatus, HealthSummary};
pub use remediation::{
    apply_remediation, RemediationOptions, Remediator, GRAPHICS_FALLBACK_ACTION,
    TEXTURE_RELOAD_DELAY,
};
pub use report::{format_diagnostic_report, DiagnosticReport, ReportOptions, ReportSummary};
pub use runner::{run_diagnostics, DiagnosticRunner};
