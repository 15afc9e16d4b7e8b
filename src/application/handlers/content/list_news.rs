//! ListNewsHandler - Query handler for paginated news.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{NewsPage, NewsRepository};

/// Query for the news listing.
#[derive(Debug, Clone)]
pub struct ListNewsQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for ListNewsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 6,
            search: None,
        }
    }
}

/// Handler for the news listing, newest first.
pub struct ListNewsHandler {
    news: Arc<dyn NewsRepository>,
}

impl ListNewsHandler {
    pub fn new(news: Arc<dyn NewsRepository>) -> Self {
        Self { news }
    }

    pub async fn handle(&self, query: ListNewsQuery) -> Result<NewsPage, DomainError> {
        self.news
            .list(
                query.page.max(1),
                query.limit.clamp(1, 50),
                query.search.as_deref(),
            )
            .await
    }
}
