use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Bounded retry with a fixed pause between attempts.
///
/// Only inventory creation goes through this; lookups and updates are
/// single-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Pause after each failed attempt that is followed by another one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Total attempts actually made; a policy of zero still tries once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Runs `attempt` until it succeeds or the attempts are used up.
    ///
    /// `attempt` receives the 1-based attempt number. On exhaustion the error
    /// of the last attempt is returned as is.
    pub async fn run<T, E, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.attempts();
        let mut current = 1;

        loop {
            match attempt(current).await {
                Ok(value) => {
                    if current > 1 {
                        tracing::info!(operation, attempt = current, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if current < max_attempts => {
                    tracing::warn!(
                        operation,
                        attempt = current,
                        max_attempts,
                        error = %err,
                        "attempt failed, retrying"
                    );
                    metrics::counter!("inventory_retries_total", "operation" => operation)
                        .increment(1);
                    tokio::time::sleep(self.delay).await;
                    current += 1;
                }
                Err(err) => {
                    tracing::error!(
                        operation,
                        attempts = current,
                        error = %err,
                        "giving up after final attempt"
                    );
                    return Err(err);
                }
            }
        }
    }
}
