//! ScreenStocksHandler - Query handler for the screener.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::stock::Stock;
use crate::domain::subscription::{has_permission, Feature};
use crate::domain::user::User;
use crate::ports::{ScreenerQuery, StockRepository};

/// Query to screen stocks along analysis dimensions.
#[derive(Debug, Clone)]
pub struct ScreenStocksCommand {
    pub principal: User,
    pub query: ScreenerQuery,
}

/// Handler for the screener. Requires the core analysis entitlement.
pub struct ScreenStocksHandler {
    stocks: Arc<dyn StockRepository>,
}

impl ScreenStocksHandler {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    pub async fn handle(&self, cmd: ScreenStocksCommand) -> Result<Vec<Stock>, DomainError> {
        let tier = cmd.principal.effective_tier(Timestamp::now());
        if !has_permission(tier, Feature::CoreAnalysis) {
            return Err(DomainError::new(
                ErrorCode::FeatureLocked,
                "The screener requires a paid tier",
            ));
        }

        self.stocks.screen(&cmd.query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::InMemoryStockRepository;
    use crate::domain::stock::Analysis;
    use crate::domain::subscription::{Subscription, UserTier};

    fn scored(ticker: &str, score: f64) -> Stock {
        Stock {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            analysis: Analysis {
                flexbit_score: Some(score),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn pioneer() -> User {
        let now = Timestamp::now();
        let mut user = User::register("p@x.id", "+62811111111", "h", "P", now);
        user.replace_subscription(
            Subscription::from_purchase(UserTier::Pioneer, "flxbt-x-1", now),
            now,
        );
        user
    }

    #[tokio::test]
    async fn paid_tier_screens_by_score_band() {
        let stocks = Arc::new(InMemoryStockRepository::with_stocks(vec![
            scored("A", 30.0),
            scored("B", 60.0),
            scored("C", 90.0),
        ]));
        let handler = ScreenStocksHandler::new(stocks);

        let hits = handler
            .handle(ScreenStocksCommand {
                principal: pioneer(),
                query: ScreenerQuery {
                    min_score: Some(50.0),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        let tickers: Vec<&str> = hits.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["C", "B"]);
    }

    #[tokio::test]
    async fn free_tier_is_locked_out() {
        let handler = ScreenStocksHandler::new(Arc::new(InMemoryStockRepository::new()));
        let free = User::register("f@x.id", "+62822222222", "h", "F", Timestamp::now());

        let err = handler
            .handle(ScreenStocksCommand {
                principal: free,
                query: ScreenerQuery::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FeatureLocked);
    }
}
