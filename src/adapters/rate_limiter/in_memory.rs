//! In-memory rate limiter.
//!
//! Fixed-window counter over a HashMap. Suitable for single-server
//! deployments; counters reset on process restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{RateLimitDecision, RateLimiter};

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
}

/// In-memory fixed-window rate limiter keyed by client identity.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    max_requests: u32,
    window_secs: u64,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

impl InMemoryRateLimiter {
    /// Creates a limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window_secs: window.as_secs().max(1),
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn now_secs() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> RateLimitDecision {
        let now = Self::now_secs();
        let mut windows = self.windows.write().await;

        let state = windows.entry(key.to_string()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now - state.window_start >= self.window_secs {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.max_requests {
            let retry_after_secs = self.window_secs - (now - state.window_start);
            return RateLimitDecision::Limited { retry_after_secs };
        }

        state.count += 1;
        RateLimitDecision::Allowed
    }
}
