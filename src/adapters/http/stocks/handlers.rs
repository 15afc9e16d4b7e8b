//! HTTP handlers for stock endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::export::ExportStocksCommand;
use crate::application::handlers::stocks::ScreenStocksCommand;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{ScreenerParams, StockListParams, StockListResponse, StockSummary};

/// GET /api/stocks - paginated, filtered listing
pub async fn get_stocks(
    State(state): State<AppState>,
    Query(params): Query<StockListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.list_stocks_handler().handle(params.into_query()).await?;
    Ok(Json(StockListResponse::from(page)))
}

/// GET /api/stocks/:ticker - full analysis document
pub async fn get_stock_by_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stock = state.get_stock_handler().handle(&ticker).await?;
    Ok(Json(stock))
}

/// GET /api/stocks/screener - filtered flat list (paid tiers)
pub async fn screener(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Query(params): Query<ScreenerParams>,
) -> Result<impl IntoResponse, ApiError> {
    let stocks = state
        .screen_stocks_handler()
        .handle(ScreenStocksCommand {
            principal,
            query: params.into_query(),
        })
        .await?;

    let summaries: Vec<StockSummary> = stocks.into_iter().map(StockSummary::from).collect();
    Ok(Json(summaries))
}

/// GET /api/stocks/stats - coverage statistics
pub async fn get_stock_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.stock_stats_handler().handle().await?;
    Ok(Json(stats))
}

/// GET /api/stocks/export - CSV download (Growth/Pro)
pub async fn export_stocks(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let export = state
        .export_stocks_handler()
        .handle(ExportStocksCommand { principal })
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
