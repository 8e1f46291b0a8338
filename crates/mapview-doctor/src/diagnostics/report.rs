//! Diagnostic report
//!
//! Summarises findings and renders them as text or JSON

use super::finding::{Finding, FindingKind};
use super::health::HealthSummary;
use serde::{Deserialize, Serialize};

/// Report rendering options
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Show remedy, cause and action lines
    pub verbose: bool,
    /// JSON output
    pub json: bool,
}

/// Diagnostic report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    /// Unix timestamp (seconds)
    pub timestamp: i64,
    pub version: String,
    pub platform: String,
    pub findings: Vec<Finding>,
    pub summary: ReportSummary,
    pub health: HealthSummary,
}

/// Report summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub succeeded: usize,
    pub errors: usize,
    pub critical: usize,
}

impl ReportSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let count = |kind: FindingKind| findings.iter().filter(|f| f.kind() == kind).count();
        Self {
            succeeded: count(FindingKind::Success),
            errors: count(FindingKind::Error),
            critical: count(FindingKind::CriticalError),
        }
    }
}

impl DiagnosticReport {
    /// Build a report for findings from a run (or a remediation pass)
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let summary = ReportSummary::from_findings(&findings);
        let health = HealthSummary::from_findings(&findings);

        Self {
            timestamp: chrono::Utc::now().timestamp(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            findings,
            summary,
            health,
        }
    }

    /// True when every finding succeeded
    pub fn is_clean(&self) -> bool {
        self.summary.errors == 0 && self.summary.critical == 0
    }
}

/// Render a diagnostic report
pub fn format_diagnostic_report(
    report: &DiagnosticReport,
    options: &ReportOptions,
) -> Result<String, serde_json::Error> {
    if options.json {
        return serde_json::to_string_pretty(report);
    }

    let mut lines = Vec::new();

    lines.push("╭─────────────────────────────────────────────╮".to_string());
    lines.push("│           MapView Doctor Report             │".to_string());
    lines.push("╰─────────────────────────────────────────────╯".to_string());
    lines.push(String::new());
    lines.push(format!("  Version:  {}", report.version));
    lines.push(format!("  Platform: {}", report.platform));
    lines.push(format!(
        "  Health:   {} ({}/100)",
        report.health.status, report.health.score
    ));
    lines.push(String::new());
    lines.push("─────────────────────────────────────────────".to_string());
    lines.push(String::new());

    for finding in &report.findings {
        let icon = match finding.kind() {
            FindingKind::Success => "✓",
            FindingKind::Error => "✗",
            FindingKind::CriticalError => "‼",
        };
        lines.push(format!("  {} {}: {}", icon, finding.component(), finding.message()));

        if options.verbose {
            if let Some(cause) = finding.cause() {
                lines.push(format!("    └─ cause: {}", cause));
            }
            if let Some(remedy) = finding.remedy() {
                lines.push(format!("    💡 fix: {}", remedy));
            }
            if let Some(action) = finding.action_taken() {
                lines.push(format!("    ↻ action: {}", action));
            }
        }
    }

    lines.push(String::new());
    lines.push("─────────────────────────────────────────────".to_string());
    lines.push(String::new());
    lines.push(format!(
        "  Summary: {} passed, {} errors, {} critical",
        report.summary.succeeded, report.summary.errors, report.summary.critical
    ));
    lines.push(String::new());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::finding::Component;

    fn sample_findings() -> Vec<Finding> {
        vec![
            Finding::success(Component::GraphicsContext, "WebGL available"),
            Finding::error(Component::TextureLoad, "Texture loading failed")
                .with_remedy("Check texture paths and CORS permissions"),
            Finding::error(Component::Backend, "Failed to connect to the server")
                .with_cause("connection refused")
                .with_remedy("Check that the server is online and reachable")
                .with_action("Applied retry with exponential backoff"),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let report = DiagnosticReport::from_findings(sample_findings());
        assert_eq!(
            report.summary,
            ReportSummary {
                succeeded: 1,
                errors: 2,
                critical: 0
            }
        );
        assert!(!report.is_clean());
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_format_text() {
        let report = DiagnosticReport::from_findings(sample_findings());
        let text = format_diagnostic_report(&report, &ReportOptions::default()).unwrap();

        assert!(text.contains("✓ Graphics context: WebGL available"));
        assert!(text.contains("✗ Texture load: Texture loading failed"));
        assert!(text.contains("Summary: 1 passed, 2 errors, 0 critical"));
        assert!(!text.contains("cause:"));
    }

    #[test]
    fn test_format_text_verbose() {
        let report = DiagnosticReport::from_findings(sample_findings());
        let options = ReportOptions {
            verbose: true,
            json: false,
        };
        let text = format_diagnostic_report(&report, &options).unwrap();

        assert!(text.contains("cause: connection refused"));
        assert!(text.contains("fix: Check texture paths and CORS permissions"));
        assert!(text.contains("action: Applied retry with exponential backoff"));
    }

    #[test]
    fn test_format_json() {
        let report = DiagnosticReport::from_findings(sample_findings());
        let options = ReportOptions {
            verbose: false,
            json: true,
        };
        let json = format_diagnostic_report(&report, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["findings"].as_array().unwrap().len(), 3);
        assert_eq!(value["findings"][2]["actionTaken"], "Applied retry with exponential backoff");
        assert_eq!(value["summary"]["errors"], 2);
        assert_eq!(value["health"]["status"], "degraded");
    }
}
