//! Router for watchlist endpoints. All routes require authentication.

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    add_to_watchlist, export_watchlist, get_watchlist, remove_from_watchlist,
    update_alert_config,
};

/// Watchlist API routes.
///
/// - `GET /` - enriched view
/// - `GET /export` - CSV download (Growth/Pro)
/// - `POST /` - add ticker (tier-limited)
/// - `DELETE /:ticker` - remove ticker
/// - `PUT /:ticker/alert` - price alert (Growth/Pro)
pub fn watchlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_watchlist).post(add_to_watchlist))
        .route("/export", get(export_watchlist))
        .route("/:ticker", delete(remove_from_watchlist))
        .route("/:ticker/alert", put(update_alert_config))
}
