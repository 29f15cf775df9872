//! Bounded retry with linear backoff for transient failures.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

/// Error text fragments that mark a failure as worth retrying.
const TRANSIENT_SIGNATURES: &[&str] = &[
    "econnreset",
    "connection reset",
    "eai_again",
    "temporary failure in name resolution",
    "enotfound",
    "failed to lookup address",
    "host not found",
    "etimedout",
    "timed out",
    "connection terminated",
];

pub fn is_transient_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TRANSIENT_SIGNATURES.iter().any(|sig| lowered.contains(sig))
}

/// How many attempts to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based): attempt × base delay.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Waits between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempts are used up. `op` receives the 1-based attempt number.
pub async fn retry_with_backoff<T, E, Op, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    is_transient: impl Fn(&E) -> bool,
    mut op: Op,
) -> Result<T, E>
where
    E: Display,
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_transient(&err) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient database failure, retrying"
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if attempt > 1 {
                    tracing::error!(attempt, error = %err, "Giving up after retries");
                }
                return Err(err);
            }
        }
    }
}
