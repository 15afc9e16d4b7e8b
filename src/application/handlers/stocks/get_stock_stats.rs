//! GetStockStatsHandler - Query handler for coverage statistics.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{StockRepository, StockStats};

/// Handler for the stats endpoint.
pub struct GetStockStatsHandler {
    stocks: Arc<dyn StockRepository>,
}

impl GetStockStatsHandler {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    pub async fn handle(&self) -> Result<StockStats, DomainError> {
        self.stocks.stats().await
    }
}
