//! HTTP handlers for watchlist endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::export::ExportWatchlistCommand;
use crate::application::handlers::watchlist::{
    AddStockCommand, ConfigureAlertCommand, GetWatchlistQuery, RemoveStockCommand,
};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{AddStockRequest, AlertConfigRequest, WatchlistResponse};

/// GET /api/watchlist - enriched watchlist view
pub async fn get_watchlist(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_watchlist_handler()
        .handle(GetWatchlistQuery {
            user_id: principal.id,
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/watchlist - add a ticker
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<AddStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let watchlist = state
        .add_stock_handler()
        .handle(AddStockCommand {
            principal,
            ticker: body.ticker,
        })
        .await?;
    Ok(Json(WatchlistResponse::from(&watchlist)))
}

/// DELETE /api/watchlist/:ticker - remove a ticker
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(ticker): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let watchlist = state
        .remove_stock_handler()
        .handle(RemoveStockCommand { principal, ticker })
        .await?;
    Ok(Json(WatchlistResponse::from(&watchlist)))
}

/// PUT /api/watchlist/:ticker/alert - set the price alert (Growth/Pro)
pub async fn update_alert_config(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(ticker): Path<String>,
    Json(body): Json<AlertConfigRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let watchlist = state
        .configure_alert_handler()
        .handle(ConfigureAlertCommand {
            principal,
            ticker,
            alert: body.into(),
        })
        .await?;
    Ok(Json(WatchlistResponse::from(&watchlist)))
}

/// GET /api/watchlist/export - CSV download (Growth/Pro)
pub async fn export_watchlist(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let export = state
        .export_watchlist_handler()
        .handle(ExportWatchlistCommand { principal })
        .await?;

    Ok((
        [
            ("Content-Type", "text/csv".to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.csv,
    ))
}
