//! HTTP DTOs for watchlist endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::watchlist::{AlertConfig, Watchlist};

/// Request to add a ticker.
#[derive(Debug, Clone, Deserialize)]
pub struct AddStockRequest {
    pub ticker: String,
}

/// Request to set an entry's price alert.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConfigRequest {
    #[serde(default)]
    pub price_above: Option<f64>,
    #[serde(default)]
    pub price_below: Option<f64>,
    pub active: bool,
}

impl From<AlertConfigRequest> for AlertConfig {
    fn from(req: AlertConfigRequest) -> Self {
        AlertConfig {
            price_above: req.price_above,
            price_below: req.price_below,
            active: req.active,
        }
    }
}

/// Plain watchlist response (mutation endpoints).
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistResponse {
    pub name: String,
    pub tickers: Vec<String>,
}

impl From<&Watchlist> for WatchlistResponse {
    fn from(watchlist: &Watchlist) -> Self {
        Self {
            name: watchlist.name.clone(),
            tickers: watchlist.entries.iter().map(|e| e.ticker.clone()).collect(),
        }
    }
}
