//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Guards an expensive endpoint against bursts of calls.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consume one unit for `key`, reporting whether the call may proceed.
    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError>;
}

#[derive(Debug, Clone)]
pub struct RateDecision {
    pub allowed: bool,
    /// How long to wait before the next call is allowed.
    pub retry_after: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
