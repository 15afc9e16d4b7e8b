//! GetWatchlistHandler - Query handler for the caller's watchlist.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::watchlist::{AlertConfig, Watchlist};
use crate::ports::{StockRepository, WatchlistRepository};

/// Query for a user's watchlist.
#[derive(Debug, Clone)]
pub struct GetWatchlistQuery {
    pub user_id: UserId,
}

/// Watchlist entry enriched with display data from the stock store.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistEntryView {
    pub ticker: String,
    pub added_at: Timestamp,
    pub notes: Option<String>,
    pub alert: Option<AlertConfig>,
    pub company_name: Option<String>,
    pub logo: Option<String>,
}

/// Enriched watchlist view.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistView {
    pub name: String,
    pub entries: Vec<WatchlistEntryView>,
}

/// Handler for the watchlist view.
///
/// A user who never touched their watchlist gets an empty one created on
/// first read, mirroring the write path.
pub struct GetWatchlistHandler {
    watchlists: Arc<dyn WatchlistRepository>,
    stocks: Arc<dyn StockRepository>,
}

impl GetWatchlistHandler {
    pub fn new(
        watchlists: Arc<dyn WatchlistRepository>,
        stocks: Arc<dyn StockRepository>,
    ) -> Self {
        Self { watchlists, stocks }
    }

    pub async fn handle(&self, query: GetWatchlistQuery) -> Result<WatchlistView, DomainError> {
        let watchlist = match self.watchlists.find_by_user(&query.user_id).await? {
            Some(watchlist) => watchlist,
            None => {
                let fresh = Watchlist::empty(query.user_id);
                self.watchlists.save(&fresh).await?;
                fresh
            }
        };

        let tickers: Vec<String> = watchlist.entries.iter().map(|e| e.ticker.clone()).collect();
        let details = self.stocks.find_by_tickers(&tickers).await?;

        let entries = watchlist
            .entries
            .into_iter()
            .map(|entry| {
                let stock = details.iter().find(|s| s.ticker == entry.ticker);
                WatchlistEntryView {
                    company_name: stock.map(|s| s.company_name.clone()),
                    logo: stock.and_then(|s| s.logo.clone()),
                    ticker: entry.ticker,
                    added_at: entry.added_at,
                    notes: entry.notes,
                    alert: entry.alert,
                }
            })
            .collect();

        Ok(WatchlistView {
            name: watchlist.name,
            entries,
        })
    }
}
