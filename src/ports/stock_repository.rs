//! Stock repository port (read side + import upsert).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::stock::Stock;

/// Sort orders for the stock listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockSort {
    /// Highest composite score first (default).
    #[default]
    ScoreDesc,
    /// Alphabetical by ticker.
    Ticker,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

/// Listing filter and pagination.
#[derive(Debug, Clone, Default)]
pub struct StockQuery {
    /// Case-insensitive match against ticker or company name.
    pub keyword: Option<String>,
    /// Exact business quality label.
    pub quality: Option<String>,
    /// Timing label fragment (case-insensitive).
    pub timing: Option<String>,
    /// Filter by conflict flag.
    pub conflict: Option<bool>,
    pub sort: StockSort,
    pub page: u32,
    pub limit: u32,
}

/// One page of the stock listing.
#[derive(Debug, Clone, Serialize)]
pub struct StockPage {
    pub stocks: Vec<Stock>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

/// Screener filter.
#[derive(Debug, Clone, Default)]
pub struct ScreenerQuery {
    pub quality: Option<String>,
    pub timing: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

/// Counts per business quality label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityCounts {
    pub solid: u64,
    pub fair: u64,
    pub attention: u64,
    pub troubled: u64,
}

/// Counts per timing label family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingCounts {
    pub momentum: u64,
    pub accumulation: u64,
    pub stabilization: u64,
    pub avoid: u64,
}

/// Conflict flag breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictCounts {
    pub conflicting: u64,
    pub aligned: u64,
}

/// Coverage statistics for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockStats {
    pub total: u64,
    pub quality: QualityCounts,
    pub timing: TimingCounts,
    pub conflict: ConflictCounts,
}

/// Repository port for stock analysis documents.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Insert or replace a document by ticker. The import job's write path.
    async fn upsert(&self, stock: &Stock) -> Result<(), DomainError>;

    /// Find a single document. Tickers are stored upper-case.
    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<Stock>, DomainError>;

    /// Documents for a set of tickers (watchlist enrichment/export).
    async fn find_by_tickers(&self, tickers: &[String]) -> Result<Vec<Stock>, DomainError>;

    /// Filtered, sorted, paginated listing.
    async fn search(&self, query: &StockQuery) -> Result<StockPage, DomainError>;

    /// Screener: filtered flat list, highest score first.
    async fn screen(&self, query: &ScreenerQuery) -> Result<Vec<Stock>, DomainError>;

    /// Coverage statistics.
    async fn stats(&self) -> Result<StockStats, DomainError>;

    /// Every document, ticker order. Export path.
    async fn list_all(&self) -> Result<Vec<Stock>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn stock_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn StockRepository) {}
    }

    #[test]
    fn default_sort_is_score_desc() {
        assert_eq!(StockQuery::default().sort, StockSort::ScoreDesc);
    }
}
