//! HTTP adapters - REST API implementation.
//!
//! Each domain module has its own router; `api_router` assembles them
//! under `/api` together with the health check and the auth middleware.

pub mod auth;
pub mod content;
pub mod error;
pub mod middleware;
pub mod payment;
pub mod state;
pub mod stocks;
pub mod users;
pub mod watchlist;

use axum::{routing::get, Json, Router};

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// GET / - health check
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "FlexBit API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Builds the full API router over the shared state.
///
/// The auth middleware runs on every route; public routes simply never
/// extract a principal. Rate limiting and the tower-http layers are
/// attached by the binary, which owns the configuration.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth::auth_routes())
        .nest("/api/payment", payment::payment_routes())
        .nest("/api/stocks", stocks::stock_routes())
        .nest("/api/watchlist", watchlist::watchlist_routes())
        .nest("/api/users", users::user_routes())
        .nest("/api/faq", content::faq_routes())
        .nest("/api/news", content::news_routes())
        .nest("/api/wiki", content::wiki_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state)
}
