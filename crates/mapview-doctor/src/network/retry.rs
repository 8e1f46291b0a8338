//! Retry policy
//!
//! Exponential or fixed backoff, capped at a maximum delay

use serde::{Deserialize, Serialize};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay (milliseconds)
    #[serde(default = "default_base_delay")]
    pub base_delay: u64,
    /// Maximum delay (milliseconds)
    #[serde(default = "default_max_delay")]
    pub max_delay: u64,
    /// Use exponential backoff
    #[serde(default = "default_exponential_backoff")]
    pub exponential_backoff: bool,
}

fn default_max_retries() -> u32 {
    4
}
fn default_base_delay() -> u64 {
    1000
}
fn default_max_delay() -> u64 {
    30000
}
fn default_exponential_backoff() -> bool {
    true
}

impl Default for RetryConfig {
    fn default() -> Self {
        DEFAULT_RETRY_CONFIG
    }
}

/// Default retry configuration
pub const DEFAULT_RETRY_CONFIG: RetryConfig = RetryConfig {
    max_retries: 4,
    base_delay: 1000,
    max_delay: 30000,
    exponential_backoff: true,
};

/// Delay before retry number `attempt` (zero based)
pub fn retry_delay(attempt: u32, config: &RetryConfig) -> u64 {
    let delay = if config.exponential_backoff {
        config
            .base_delay
            .saturating_mul(2u64.saturating_pow(attempt))
    } else {
        config.base_delay
    };
    delay.min(config.max_delay)
}

/// Planned delays for every retry
pub fn backoff_schedule(config: &RetryConfig) -> Vec<u64> {
    (0..config.max_retries)
        .map(|attempt| retry_delay(attempt, config))
        .collect()
}
