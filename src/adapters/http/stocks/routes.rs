//! Router for stock endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{export_stocks, get_stock_by_ticker, get_stock_stats, get_stocks, screener};

/// Stock API routes.
///
/// Listing, detail and stats are public; the screener and the export are
/// authenticated and entitlement-gated. Fixed paths are registered before
/// the `:ticker` capture.
pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_stocks))
        .route("/screener", get(screener))
        .route("/stats", get(get_stock_stats))
        .route("/export", get(export_stocks))
        .route("/:ticker", get(get_stock_by_ticker))
}
