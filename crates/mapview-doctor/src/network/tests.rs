//! Network module tests

use super::*;
use std::time::Duration;

#[test]
fn test_retry_config_default() {
    let config = RetryConfig::default();
    assert_eq!(config.max_retries, 4);
    assert_eq!(config.base_delay, 1000);
    assert_eq!(config.max_delay, 30000);
    assert!(config.exponential_backoff);
}

#[test]
fn test_retry_config_deserialize_defaults() {
    let config: RetryConfig = serde_json::from_str(r#"{"maxRetries": 2}"#).unwrap();
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.base_delay, 1000);
    assert!(config.exponential_backoff);
}

#[test]
fn test_retry_delay_fixed() {
    let config = RetryConfig {
        exponential_backoff: false,
        ..Default::default()
    };

    assert_eq!(retry_delay(0, &config), 1000);
    assert_eq!(retry_delay(1, &config), 1000);
    assert_eq!(retry_delay(5, &config), 1000);
}

#[test]
fn test_retry_delay_exponential() {
    let config = RetryConfig::default();

    assert_eq!(retry_delay(0, &config), 1000);
    assert_eq!(retry_delay(1, &config), 2000);
    assert_eq!(retry_delay(2, &config), 4000);
    assert_eq!(retry_delay(3, &config), 8000);
}

#[test]
fn test_retry_delay_capped() {
    let config = RetryConfig {
        max_delay: 5000,
        ..Default::default()
    };

    assert_eq!(retry_delay(3, &config), 5000);
    assert_eq!(retry_delay(40, &config), 5000);
    assert_eq!(retry_delay(u32::MAX, &config), 5000);
}

#[test]
fn test_retry_config_ignores_unknown_fields() {
    let config: RetryConfig = serde_json::from_str(r#"{"jitter": 0.5}"#).unwrap();
    assert_eq!(config, RetryConfig::default());
}

#[test]
fn test_backoff_schedule() {
    let config = RetryConfig::default();
    assert_eq!(backoff_schedule(&config), vec![1000, 2000, 4000, 8000]);

    let none = RetryConfig {
        max_retries: 0,
        ..Default::default()
    };
    assert!(backoff_schedule(&none).is_empty());
}

#[tokio::test]
async fn test_with_timeout_success() {
    let result = with_timeout(async { 42 }, Duration::from_millis(100)).await;
    assert_eq!(result, Ok(42));
}

#[tokio::test(start_paused = true)]
async fn test_with_timeout_elapsed() {
    let result = with_timeout(
        tokio::time::sleep(Duration::from_secs(10)),
        Duration::from_millis(250),
    )
    .await;
    assert_eq!(result, Err(TimeoutError { timeout_ms: 250 }));
}

#[tokio::test]
async fn test_with_optional_timeout_none() {
    let result = with_optional_timeout(async { "done" }, None).await;
    assert_eq!(result, Ok("done"));
}
