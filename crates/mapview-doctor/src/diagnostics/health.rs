//! Health roll-up
//!
//! Collapses a list of findings into a single status and score

use super::finding::{Finding, FindingKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthStatus {
    /// Every check passed
    Healthy,
    /// At least one recoverable error
    Degraded,
    /// At least one critical error
    Unhealthy,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub status: HealthStatus,
    /// Health score (0-100)
    pub score: u8,
    /// `<component>: <message>` for each critical finding
    pub critical_issues: Vec<String>,
}

impl HealthSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let total = findings.len();
        let errors = findings
            .iter()
            .filter(|f| f.kind() == FindingKind::Error)
            .count();
        let critical_issues: Vec<String> = findings
            .iter()
            .filter(|f| f.kind() == FindingKind::CriticalError)
            .map(|f| format!("{}: {}", f.component(), f.message()))
            .collect();

        // a critical finding costs a whole check, an error half of one
        let score = if total > 0 {
            let penalty = critical_issues.len() as f64 + errors as f64 * 0.5;
            let raw_score = ((total as f64 - penalty) / total as f64) * 100.0;
            raw_score.clamp(0.0, 100.0).round() as u8
        } else {
            100
        };

        let status = if !critical_issues.is_empty() {
            HealthStatus::Unhealthy
        } else if errors > 0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            score,
            critical_issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::finding::Component;

    #[test]
    fn test_health_summary_healthy() {
        let findings: Vec<Finding> = Component::ALL
            .iter()
            .map(|c| Finding::success(*c, "ok"))
            .collect();
        let summary = HealthSummary::from_findings(&findings);

        assert_eq!(summary.status, HealthStatus::Healthy);
        assert_eq!(summary.score, 100);
        assert!(summary.critical_issues.is_empty());
    }

    #[test]
    fn test_health_summary_degraded() {
        let findings = vec![
            Finding::success(Component::GraphicsContext, "ok"),
            Finding::error(Component::TextureLoad, "failed"),
            Finding::success(Component::Backend, "ok"),
        ];
        let summary = HealthSummary::from_findings(&findings);

        assert_eq!(summary.status, HealthStatus::Degraded);
        assert_eq!(summary.score, 83);
    }

    #[test]
    fn test_health_summary_unhealthy() {
        let findings = vec![
            Finding::critical(Component::GraphicsContext, "WebGL is not available"),
            Finding::error(Component::TextureLoad, "failed"),
            Finding::error(Component::Backend, "down"),
        ];
        let summary = HealthSummary::from_findings(&findings);

        assert_eq!(summary.status, HealthStatus::Unhealthy);
        assert_eq!(summary.score, 33);
        assert_eq!(
            summary.critical_issues,
            vec!["Graphics context: WebGL is not available".to_string()]
        );
    }

    #[test]
    fn test_health_summary_empty() {
        let summary = HealthSummary::from_findings(&[]);
        assert_eq!(summary.status, HealthStatus::Healthy);
        assert_eq!(summary.score, 100);
    }
}
