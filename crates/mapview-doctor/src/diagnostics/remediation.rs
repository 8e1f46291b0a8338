//! Remediation pass
//!
//! Annotates failed findings with the corrective action chosen for their
//! component. The action is recorded, not executed: no fallback renderer is
//! started, no texture is refetched and no request is retried.

use super::finding::{Component, Finding};
use crate::network::{backoff_schedule, RetryConfig};
use futures::future::join_all;
use std::time::Duration;
use tracing::debug;

/// Delay before the texture reload note is recorded
pub const TEXTURE_RELOAD_DELAY: Duration = Duration::from_millis(1000);

pub const GRAPHICS_FALLBACK_ACTION: &str = "Attempted fallback to 2D rendering";

/// Remediation options
#[derive(Debug, Clone, PartialEq)]
pub struct RemediationOptions {
    /// Wait before recording the texture reload
    pub reload_delay: Duration,
    /// Backoff policy described for backend findings
    pub retry: RetryConfig,
}

impl Default for RemediationOptions {
    fn default() -> Self {
        Self {
            reload_delay: TEXTURE_RELOAD_DELAY,
            retry: RetryConfig::default(),
        }
    }
}

/// Remediator
#[derive(Debug, Clone, Default)]
pub struct Remediator {
    options: RemediationOptions,
}

impl Remediator {
    pub fn new(options: RemediationOptions) -> Self {
        Self { options }
    }

    /// Annotate every failed finding; output keeps the input order and length
    ///
    /// Findings are processed concurrently, so the pass waits for the reload
    /// delay once no matter how many texture findings there are.
    pub async fn apply(&self, findings: Vec<Finding>) -> Vec<Finding> {
        join_all(findings.into_iter().map(|finding| self.remediate(finding))).await
    }

    async fn remediate(&self, finding: Finding) -> Finding {
        if !finding.kind().is_failure() {
            return finding;
        }

        let action = match finding.component() {
            Component::GraphicsContext => GRAPHICS_FALLBACK_ACTION.to_string(),
            Component::TextureLoad => {
                tokio::time::sleep(self.options.reload_delay).await;
                format!(
                    "Attempted reload after {}ms delay",
                    self.options.reload_delay.as_millis()
                )
            }
            Component::Backend => self.backoff_action(),
        };

        debug!(component = %finding.component(), action = %action, "remediation recorded");
        finding.with_action(action)
    }

    fn backoff_action(&self) -> String {
        let strategy = if self.options.retry.exponential_backoff {
            "Applied retry with exponential backoff"
        } else {
            "Applied retry with fixed backoff"
        };

        let schedule = backoff_schedule(&self.options.retry);
        if schedule.is_empty() {
            return strategy.to_string();
        }

        let delays = schedule
            .iter()
            .map(|ms| format!("{}ms", ms))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} (planned delays: {})", strategy, delays)
    }
}

/// Annotate failed findings using the default options
pub async fn apply_remediation(findings: Vec<Finding>) -> Vec<Finding> {
    Remediator::default().apply(findings).await
}
