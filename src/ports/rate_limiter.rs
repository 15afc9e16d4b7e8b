//! Rate limiter port.

use async_trait::async_trait;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request may proceed.
    Allowed,
    /// Over limit; retry after the given number of seconds.
    Limited { retry_after_secs: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Port for request rate limiting, keyed by client identity (IP).
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record a hit for the key and decide whether it may proceed.
    async fn check(&self, key: &str) -> RateLimitDecision;
}
