//! Content repository ports - FAQs, news, wiki.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::content::{Faq, NewsArticle, WikiEntry};
use crate::domain::foundation::DomainError;

/// One page of news articles.
#[derive(Debug, Clone, Serialize)]
pub struct NewsPage {
    pub data: Vec<NewsArticle>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

/// Repository port for FAQs.
#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// Active FAQs, optionally filtered by category, sorted by category
    /// then question.
    async fn list_active(&self, category: Option<&str>) -> Result<Vec<Faq>, DomainError>;
}

/// Repository port for news articles.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Paginated articles, newest first, optional headline/content search.
    async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<NewsPage, DomainError>;
}

/// Repository port for wiki entries.
#[async_trait]
pub trait WikiRepository: Send + Sync {
    /// Entries sorted by display order, optionally filtered by category.
    async fn list(&self, category: Option<&str>) -> Result<Vec<WikiEntry>, DomainError>;
}
