//! GetStockHandler - Query handler for a single stock document.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::stock::Stock;
use crate::ports::StockRepository;

/// Handler for single-stock lookups by ticker.
pub struct GetStockHandler {
    stocks: Arc<dyn StockRepository>,
}

impl GetStockHandler {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    pub async fn handle(&self, ticker: &str) -> Result<Stock, DomainError> {
        self.stocks
            .find_by_ticker(&ticker.trim().to_uppercase())
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::StockNotFound, "Stock not found"))
    }
}
