//! AddStockHandler - Command handler for adding a watchlist entry.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::limits_for;
use crate::domain::user::User;
use crate::domain::watchlist::Watchlist;
use crate::ports::{StockRepository, WatchlistRepository};

/// Command to add a ticker to the caller's watchlist.
#[derive(Debug, Clone)]
pub struct AddStockCommand {
    pub principal: User,
    pub ticker: String,
}

/// Handler for watchlist additions.
///
/// The size limit comes from the principal's *effective* tier, so a lapsed
/// annual subscription is bounded like a free account.
pub struct AddStockHandler {
    watchlists: Arc<dyn WatchlistRepository>,
    stocks: Arc<dyn StockRepository>,
}

impl AddStockHandler {
    pub fn new(
        watchlists: Arc<dyn WatchlistRepository>,
        stocks: Arc<dyn StockRepository>,
    ) -> Self {
        Self { watchlists, stocks }
    }

    pub async fn handle(&self, cmd: AddStockCommand) -> Result<Watchlist, DomainError> {
        let ticker = cmd.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(DomainError::validation("ticker", "Ticker is required"));
        }

        if self.stocks.find_by_ticker(&ticker).await?.is_none() {
            return Err(DomainError::new(ErrorCode::StockNotFound, "Stock not found"));
        }

        let now = Timestamp::now();
        let mut watchlist = self
            .watchlists
            .find_by_user(&cmd.principal.id)
            .await?
            .unwrap_or_else(|| Watchlist::empty(cmd.principal.id));

        let limits = limits_for(cmd.principal.effective_tier(now));
        watchlist.add(ticker, &limits, now)?;
        self.watchlists.save(&watchlist).await?;

        Ok(watchlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        InMemoryStockRepository, InMemoryWatchlistRepository,
    };
    use crate::domain::stock::Stock;
    use crate::domain::subscription::{Subscription, UserTier};

    fn stock(ticker: &str) -> Stock {
        Stock {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            ..Default::default()
        }
    }

    fn principal() -> User {
        User::register(
            "joko@example.com",
            "+628112223334",
            "hash",
            "Joko",
            Timestamp::now(),
        )
    }

    fn handler(stocks: Vec<Stock>) -> (AddStockHandler, Arc<InMemoryWatchlistRepository>) {
        let watchlists = Arc::new(InMemoryWatchlistRepository::new());
        let handler = AddStockHandler::new(
            watchlists.clone(),
            Arc::new(InMemoryStockRepository::with_stocks(stocks)),
        );
        (handler, watchlists)
    }

    #[tokio::test]
    async fn adds_known_ticker_uppercased() {
        let (handler, _) = handler(vec![stock("BBCA")]);
        let watchlist = handler
            .handle(AddStockCommand {
                principal: principal(),
                ticker: "bbca".to_string(),
            })
            .await
            .unwrap();
        assert!(watchlist.contains("BBCA"));
    }

    #[tokio::test]
    async fn unknown_ticker_is_404() {
        let (handler, _) = handler(vec![]);
        let err = handler
            .handle(AddStockCommand {
                principal: principal(),
                ticker: "GOTO".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StockNotFound);
    }

    #[tokio::test]
    async fn free_tier_stops_at_five_entries() {
        let tickers = ["AAAA", "BBBB", "CCCC", "DDDD", "EEEE", "FFFF"];
        let (handler, _) = handler(tickers.iter().map(|t| stock(t)).collect());
        let me = principal();

        for ticker in &tickers[..5] {
            handler
                .handle(AddStockCommand {
                    principal: me.clone(),
                    ticker: ticker.to_string(),
                })
                .await
                .unwrap();
        }

        let err = handler
            .handle(AddStockCommand {
                principal: me,
                ticker: "FFFF".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TierLimitReached);
    }

    #[tokio::test]
    async fn expired_growth_subscription_is_limited_like_free() {
        let tickers = ["AAAA", "BBBB", "CCCC", "DDDD", "EEEE", "FFFF"];
        let (handler, _) = handler(tickers.iter().map(|t| stock(t)).collect());

        let mut me = principal();
        let long_ago = Timestamp::now().minus_days(400);
        me.replace_subscription(
            Subscription::from_purchase(UserTier::Growth, "flxbt-x-1", long_ago),
            long_ago,
        );

        for ticker in &tickers[..5] {
            handler
                .handle(AddStockCommand {
                    principal: me.clone(),
                    ticker: ticker.to_string(),
                })
                .await
                .unwrap();
        }

        let err = handler
            .handle(AddStockCommand {
                principal: me,
                ticker: "FFFF".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TierLimitReached);
    }
}
