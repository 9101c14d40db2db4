// Opt-in retry with exponential backoff for upstream calls
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors that know whether another attempt could succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Statuses worth another attempt: 5xx, 429 and 408.
///
/// 401/403 and other client errors fail the same way every time.
pub fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status.is_server_error()
        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Single attempt, no retries. What the upstream clients use unless told otherwise.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Retry policy with `max_retries` attempts on top of the first one
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    fn next_delay(&self, delay_ms: u64) -> u64 {
        (((delay_ms as f64) * self.backoff_multiplier) as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Run `operation`, retrying retryable failures with exponential backoff.
///
/// A non-retryable error is returned on the attempt that produced it.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display + Retryable,
{
    let mut retries = 0;
    let mut delay_ms = config.initial_delay_ms;

    loop {
        let err = match operation().await {
            Ok(result) => {
                if retries > 0 {
                    debug!(retries, "Request succeeded after retrying");
                }
                return Ok(result);
            }
            Err(err) => err,
        };

        if !err.is_retryable() {
            debug!("Not retrying: {}", err);
            return Err(err);
        }
        if retries >= config.max_retries {
            warn!("Request failed after {} attempt(s): {}", retries + 1, err);
            return Err(err);
        }

        retries += 1;
        warn!(
            "Request failed (retry {}/{}): {}. Retrying in {}ms",
            retries, config.max_retries, err, delay_ms
        );
        sleep(Duration::from_millis(delay_ms)).await;
        delay_ms = config.next_delay(delay_ms);
    }
}
