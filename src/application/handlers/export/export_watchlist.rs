//! ExportWatchlistHandler - CSV export of the caller's watchlist.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::{has_permission, Feature};
use crate::domain::user::User;
use crate::ports::{StockRepository, WatchlistRepository};

use super::csv::stocks_to_csv;
use super::export_stocks::CsvExport;

/// Command to export the caller's watchlist as CSV.
#[derive(Debug, Clone)]
pub struct ExportWatchlistCommand {
    pub principal: User,
}

/// Handler for the watchlist export. Requires the export entitlement.
pub struct ExportWatchlistHandler {
    watchlists: Arc<dyn WatchlistRepository>,
    stocks: Arc<dyn StockRepository>,
}

impl ExportWatchlistHandler {
    pub fn new(
        watchlists: Arc<dyn WatchlistRepository>,
        stocks: Arc<dyn StockRepository>,
    ) -> Self {
        Self { watchlists, stocks }
    }

    pub async fn handle(&self, cmd: ExportWatchlistCommand) -> Result<CsvExport, DomainError> {
        let tier = cmd.principal.effective_tier(Timestamp::now());
        if !has_permission(tier, Feature::ExportData) {
            return Err(DomainError::new(
                ErrorCode::FeatureLocked,
                "Data export requires the Growth or Pro tier",
            ));
        }

        let watchlist = self
            .watchlists
            .find_by_user(&cmd.principal.id)
            .await?
            .filter(|w| !w.is_empty())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::WatchlistEntryNotFound, "Watchlist is empty")
            })?;

        let tickers: Vec<String> = watchlist.entries.iter().map(|e| e.ticker.clone()).collect();
        let mut stocks = self.stocks.find_by_tickers(&tickers).await?;
        stocks.sort_by(|a, b| a.ticker.cmp(&b.ticker));

        if stocks.is_empty() {
            return Err(DomainError::new(
                ErrorCode::StockNotFound,
                "No stock data found for watchlist items",
            ));
        }

        Ok(CsvExport {
            filename: "flexbit_watchlist_export.csv",
            csv: stocks_to_csv(&stocks),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        InMemoryStockRepository, InMemoryWatchlistRepository,
    };
    use crate::domain::stock::Stock;
    use crate::domain::subscription::{limits_for, Subscription, UserTier};
    use crate::domain::watchlist::Watchlist;

    fn pro_user() -> User {
        let now = Timestamp::now();
        let mut user = User::register("o@x.id", "+62811111111", "h", "O", now);
        user.replace_subscription(
            Subscription::from_purchase(UserTier::Pro, "flxbt-x-1", now),
            now,
        );
        user
    }

    #[tokio::test]
    async fn exports_watchlisted_stocks_only() {
        let user = pro_user();

        let watchlists = Arc::new(InMemoryWatchlistRepository::new());
        let mut watchlist = Watchlist::empty(user.id);
        watchlist
            .add("BBCA", &limits_for(UserTier::Pro), Timestamp::now())
            .unwrap();
        watchlists.save(&watchlist).await.unwrap();

        let stocks = Arc::new(InMemoryStockRepository::with_stocks(vec![
            Stock {
                ticker: "BBCA".to_string(),
                company_name: "Bank Central Asia".to_string(),
                ..Default::default()
            },
            Stock {
                ticker: "TLKM".to_string(),
                company_name: "Telkom".to_string(),
                ..Default::default()
            },
        ]));

        let handler = ExportWatchlistHandler::new(watchlists, stocks);
        let export = handler
            .handle(ExportWatchlistCommand { principal: user })
            .await
            .unwrap();

        assert!(export.csv.contains("BBCA"));
        assert!(!export.csv.contains("TLKM"));
    }

    #[tokio::test]
    async fn empty_watchlist_is_404() {
        let user = pro_user();
        let handler = ExportWatchlistHandler::new(
            Arc::new(InMemoryWatchlistRepository::new()),
            Arc::new(InMemoryStockRepository::new()),
        );

        let err = handler
            .handle(ExportWatchlistCommand { principal: user })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WatchlistEntryNotFound);
    }

    #[tokio::test]
    async fn free_user_is_locked_out() {
        let user = User::register("q@x.id", "+62822222222", "h", "Q", Timestamp::now());
        let handler = ExportWatchlistHandler::new(
            Arc::new(InMemoryWatchlistRepository::new()),
            Arc::new(InMemoryStockRepository::new()),
        );

        let err = handler
            .handle(ExportWatchlistCommand { principal: user })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FeatureLocked);
    }
}
