//! Probe timeouts
//!
//! Probes have no timeout unless one is configured.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Timeout error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Operation timed out after {timeout_ms}ms")]
pub struct TimeoutError {
    /// Timeout (milliseconds)
    pub timeout_ms: u64,
}

/// Run an async operation with a timeout
pub async fn with_timeout<T, F>(future: F, limit: Duration) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    match timeout(limit, future).await {
        Ok(result) => Ok(result),
        Err(_) => Err(TimeoutError {
            timeout_ms: limit.as_millis() as u64,
        }),
    }
}

/// Run an async operation with an optional timeout
///
/// `None` awaits the future to completion.
pub async fn with_optional_timeout<T, F>(
    future: F,
    limit: Option<Duration>,
) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    match limit {
        Some(limit) => with_timeout(future, limit).await,
        None => Ok(future.await),
    }
}
