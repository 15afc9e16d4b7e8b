//! ListStocksHandler - Query handler for the paginated stock listing.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{StockPage, StockQuery, StockRepository};

/// Handler for the public stock listing.
pub struct ListStocksHandler {
    stocks: Arc<dyn StockRepository>,
}

impl ListStocksHandler {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    pub async fn handle(&self, mut query: StockQuery) -> Result<StockPage, DomainError> {
        query.page = query.page.max(1);
        query.limit = query.limit.clamp(1, 100);
        self.stocks.search(&query).await
    }
}
