//! HTTP handlers for content endpoints.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::handlers::content::ListNewsQuery;

use super::super::error::ApiError;
use super::super::state::AppState;

/// Category filter shared by FAQ and wiki listings.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryParams {
    #[serde(default)]
    pub category: Option<String>,
}

/// Pagination and search parameters for the news listing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    6
}

/// GET /api/faq - active FAQs
pub async fn get_faqs(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let faqs = state
        .list_faqs_handler()
        .handle(params.category.as_deref())
        .await?;
    Ok(Json(faqs))
}

/// GET /api/news - paginated news, newest first
pub async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_news_handler()
        .handle(ListNewsQuery {
            page: params.page,
            limit: params.limit,
            search: params.search,
        })
        .await?;

    Ok(Json(serde_json::json!({
        "data": page.data,
        "pagination": {
            "currentPage": page.current_page,
            "totalPages": page.total_pages,
            "totalItems": page.total_items,
            "hasNextPage": page.current_page < page.total_pages,
            "hasPrevPage": page.current_page > 1,
        }
    })))
}

/// GET /api/wiki - wiki entries in display order
pub async fn get_wikis(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .list_wikis_handler()
        .handle(params.category.as_deref())
        .await?;
    Ok(Json(entries))
}
