//! Content HTTP adapter (FAQ, news, wiki).

mod handlers;

use axum::{routing::get, Router};

use self::handlers::{get_faqs, get_news, get_wikis};
use super::state::AppState;

/// FAQ routes (public).
pub fn faq_routes() -> Router<AppState> {
    Router::new().route("/", get(get_faqs))
}

/// News routes (public).
pub fn news_routes() -> Router<AppState> {
    Router::new().route("/", get(get_news))
}

/// Wiki routes (public).
pub fn wiki_routes() -> Router<AppState> {
    Router::new().route("/", get(get_wikis))
}
