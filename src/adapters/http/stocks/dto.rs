//! HTTP DTOs for stock endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::stock::{ConflictInfo, Signals, Stock, StockProfile};
use crate::ports::{ScreenerQuery, StockPage, StockQuery, StockSort};

/// Query parameters for the stock listing.
#[derive(Debug, Clone, Deserialize)]
pub struct StockListParams {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    /// "true" / "false"
    #[serde(default)]
    pub conflict: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl StockListParams {
    pub fn into_query(self) -> StockQuery {
        let quality = self.quality.filter(|q| q != "All");
        let sort = match self.sort.as_deref() {
            Some("ticker") => StockSort::Ticker,
            Some("price_asc") => StockSort::PriceAsc,
            Some("price_desc") => StockSort::PriceDesc,
            _ => StockSort::ScoreDesc,
        };

        StockQuery {
            keyword: self.keyword.filter(|k| !k.trim().is_empty()),
            quality,
            timing: self.timing,
            conflict: self.conflict.as_deref().map(|c| c == "true"),
            sort,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Query parameters for the screener.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerParams {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
}

impl ScreenerParams {
    pub fn into_query(self) -> ScreenerQuery {
        ScreenerQuery {
            quality: self.quality,
            timing: self.timing,
            min_score: self.min_score,
            max_score: self.max_score,
        }
    }
}

/// Listing card: the subset of the document the overview pages render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub ticker: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub logo: Option<String>,
    pub flexbit_score: Option<f64>,
    pub business_quality: Option<String>,
    pub timing_score: Option<f64>,
    pub timing_label: Option<String>,
    pub conflict: ConflictInfo,
    pub investor_profile: Option<String>,
    pub profile_emoji: Option<String>,
    pub last_price: Option<f64>,
    pub price_change_percent: Option<f64>,
    pub trend: Option<String>,
    pub trend_strength: Option<String>,
    pub signals: Signals,
}

impl From<Stock> for StockSummary {
    fn from(stock: Stock) -> Self {
        let StockProfile { emoji, .. } = stock.analysis.stock_profile;
        Self {
            ticker: stock.ticker,
            company_name: stock.company_name,
            sector: stock.sector,
            logo: stock.logo,
            flexbit_score: stock.analysis.flexbit_score,
            business_quality: stock.analysis.business_quality,
            timing_score: stock.analysis.timing_score,
            timing_label: stock.analysis.timing_label,
            conflict: stock.analysis.conflict,
            investor_profile: stock.analysis.investor_profile,
            profile_emoji: emoji,
            last_price: stock.technical.last_price,
            price_change_percent: stock.technical.price_change_percent,
            trend: stock.technical.trend,
            trend_strength: stock.technical.trend_strength,
            signals: stock.technical.signals,
        }
    }
}

/// One page of listing cards.
#[derive(Debug, Clone, Serialize)]
pub struct StockListResponse {
    pub stocks: Vec<StockSummary>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl From<StockPage> for StockListResponse {
    fn from(page: StockPage) -> Self {
        Self {
            stocks: page.stocks.into_iter().map(StockSummary::from).collect(),
            page: page.page,
            pages: page.pages,
            total: page.total,
        }
    }
}
