//! Retry with exponential backoff for metadata lookups.

use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::sources::SourceError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Maximum time for a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Retry policy for resolver requests: `max_retries` on top of the first attempt
    pub fn for_resolver(max_retries: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_retries.saturating_add(1),
            attempt_timeout,
            ..Self::default()
        }
    }

    /// Backoff delay before attempt `attempts + 1`
    fn backoff(&self, attempts: u32) -> Duration {
        let exp = self.initial_delay.as_secs_f64()
            * self
                .backoff_multiplier
                .powi(attempts.saturating_sub(1) as i32);
        Duration::from_secs_f64(exp.min(self.max_delay.as_secs_f64()))
    }
}

/// Transient errors that should trigger a retry
#[derive(Debug, Clone, PartialEq)]
pub enum TransientError {
    /// Network connectivity issues
    Network,
    /// Rate limit exceeded (with optional retry-after seconds)
    RateLimit(Option<u64>),
    /// Server error (5xx)
    ServerError,
    /// Request timeout
    Timeout,
}

impl TransientError {
    /// Check if a SourceError represents a transient error
    pub fn from_source_error(err: &SourceError) -> Option<Self> {
        match err {
            SourceError::RateLimit(retry_after) => Some(TransientError::RateLimit(*retry_after)),
            SourceError::Network(msg) => {
                if msg.to_lowercase().contains("timed out") {
                    Some(TransientError::Timeout)
                } else {
                    Some(TransientError::Network)
                }
            }
            SourceError::Api(msg) => {
                let msg_lower = msg.to_lowercase();
                if msg_lower.contains("server error")
                    || msg_lower.contains("service unavailable")
                    || msg_lower.contains("temporarily unavailable")
                {
                    Some(TransientError::ServerError)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Minimum wait requested by the server, if any
    pub fn recommended_delay(&self) -> Option<Duration> {
        match self {
            TransientError::RateLimit(Some(seconds)) => Some(Duration::from_secs(*seconds)),
            _ => None,
        }
    }
}

/// Execute an async operation with retry logic
///
/// Permanent errors (not found, parse failures, bad requests) are returned
/// immediately. Transient errors are retried until `max_attempts` is
/// reached, then the last error is returned.
pub async fn with_retry<T, F, Fut>(config: RetryConfig, operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SourceError>>,
{
    let mut attempts = 0;
    let mut operation = operation;

    loop {
        attempts += 1;

        let error = match timeout(config.attempt_timeout, operation()).await {
            Ok(Ok(result)) => {
                if attempts > 1 {
                    tracing::info!(
                        "Operation succeeded on attempt {} after {} transient failures",
                        attempts,
                        attempts - 1
                    );
                }
                return Ok(result);
            }
            Ok(Err(error)) => error,
            Err(_) => SourceError::Network("Operation timed out".to_string()),
        };

        let Some(transient) = TransientError::from_source_error(&error) else {
            return Err(error);
        };

        if attempts >= config.max_attempts {
            tracing::warn!("Operation failed after {} attempts: {}", attempts, error);
            return Err(error);
        }

        let delay = match transient.recommended_delay() {
            Some(requested) => requested.max(config.backoff(attempts)),
            None => config.backoff(attempts),
        };

        tracing::debug!(
            "Transient error on attempt {}: {:?}, retrying in {:?}",
            attempts,
            transient,
            delay
        );
        sleep(delay).await;
    }
}
