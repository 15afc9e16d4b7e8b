//! IP rate limiting middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{RateLimitDecision, RateLimiter};

use super::super::error::ErrorResponse;

/// Rejects requests over the per-IP budget with 429.
///
/// Prefers `X-Forwarded-For` (first hop) so the limiter keys on the real
/// client behind a proxy; falls back to the socket peer address.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<dyn RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match limiter.check(&key).await {
        RateLimitDecision::Allowed => next.run(request).await,
        RateLimitDecision::Limited { retry_after_secs } => {
            tracing::debug!(client = %key, retry_after_secs, "Rate limited");
            (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_after_secs.to_string())],
                Json(ErrorResponse::new(
                    "RATE_LIMITED",
                    "Too many requests, please retry later",
                )),
            )
                .into_response()
        }
    }
}

fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
