//! Retry with backoff
//!
//! Re-runs a fallible async operation with a growing delay between attempts,
//! for flaky calls such as syncing stock movements once the device is back
//! online.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by [`retry`].
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed; carries the last failure
    #[error("All {attempts} retry attempts exhausted: {last_error}")]
    Exhausted { attempts: u32, last_error: E },

    /// The configuration cannot run even one attempt
    #[error("Invalid retry configuration: {0}")]
    InvalidConfig(String),
}

/// How the delay grows between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Same delay every time
    Fixed,
    /// `initial_delay * factor^attempt`
    Exponential { factor: f64 },
}

/// Retry parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff: Backoff,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            backoff: Backoff::Exponential { factor: 2.0 },
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after the failed attempt numbered `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            Backoff::Fixed => self.initial_delay,
            Backoff::Exponential { factor } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let millis = self.initial_delay.as_millis() as f64 * factor.powi(exponent);
                if millis.is_finite() && millis >= 0.0 {
                    Duration::from_millis(millis.min(u64::MAX as f64) as u64)
                } else {
                    self.max_delay
                }
            }
        };
        delay.min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds or `config.max_attempts` is reached.
///
/// `operation` is called afresh for every attempt. Failures are logged and
/// the last one is returned inside [`RetryError::Exhausted`].
pub async fn retry<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    if config.max_attempts == 0 {
        return Err(RetryError::InvalidConfig(
            "max_attempts must be at least 1".to_string(),
        ));
    }

    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt + 1 >= config.max_attempts => {
                error!(attempts = config.max_attempts, error = %err, "operation failed, giving up");
                return Err(RetryError::Exhausted {
                    attempts: config.max_attempts,
                    last_error: err,
                });
            }
            Err(err) => {
                let delay = config.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
