//! ExportStocksHandler - CSV export of the full stock universe.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::{has_permission, Feature};
use crate::domain::user::User;
use crate::ports::StockRepository;

use super::csv::stocks_to_csv;

/// Command to export all stocks as CSV.
#[derive(Debug, Clone)]
pub struct ExportStocksCommand {
    pub principal: User,
}

/// CSV payload plus suggested filename.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: &'static str,
    pub csv: String,
}

/// Handler for the stock export. Requires the export entitlement.
pub struct ExportStocksHandler {
    stocks: Arc<dyn StockRepository>,
}

impl ExportStocksHandler {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    pub async fn handle(&self, cmd: ExportStocksCommand) -> Result<CsvExport, DomainError> {
        let tier = cmd.principal.effective_tier(Timestamp::now());
        if !has_permission(tier, Feature::ExportData) {
            return Err(DomainError::new(
                ErrorCode::FeatureLocked,
                "Data export requires the Growth or Pro tier",
            ));
        }

        let stocks = self.stocks.list_all().await?;
        if stocks.is_empty() {
            return Err(DomainError::new(
                ErrorCode::StockNotFound,
                "No stocks found to export",
            ));
        }

        Ok(CsvExport {
            filename: "flexbit_stocks_export.csv",
            csv: stocks_to_csv(&stocks),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::InMemoryStockRepository;
    use crate::domain::stock::Stock;
    use crate::domain::subscription::{Subscription, UserTier};

    fn growth_user() -> User {
        let now = Timestamp::now();
        let mut user = User::register("m@x.id", "+62811111111", "h", "M", now);
        user.replace_subscription(
            Subscription::from_purchase(UserTier::Growth, "flxbt-x-1", now),
            now,
        );
        user
    }

    fn one_stock() -> Vec<Stock> {
        vec![Stock {
            ticker: "BBCA".to_string(),
            company_name: "Bank Central Asia".to_string(),
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn growth_user_gets_csv() {
        let handler =
            ExportStocksHandler::new(Arc::new(InMemoryStockRepository::with_stocks(one_stock())));
        let export = handler
            .handle(ExportStocksCommand {
                principal: growth_user(),
            })
            .await
            .unwrap();
        assert_eq!(export.filename, "flexbit_stocks_export.csv");
        assert!(export.csv.contains("BBCA"));
    }

    #[tokio::test]
    async fn pioneer_user_is_locked_out() {
        let now = Timestamp::now();
        let mut user = User::register("n@x.id", "+62822222222", "h", "N", now);
        user.replace_subscription(
            Subscription::from_purchase(UserTier::Pioneer, "flxbt-x-2", now),
            now,
        );

        let handler =
            ExportStocksHandler::new(Arc::new(InMemoryStockRepository::with_stocks(one_stock())));
        let err = handler
            .handle(ExportStocksCommand { principal: user })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FeatureLocked);
    }

    #[tokio::test]
    async fn empty_universe_is_404() {
        let handler = ExportStocksHandler::new(Arc::new(InMemoryStockRepository::new()));
        let err = handler
            .handle(ExportStocksCommand {
                principal: growth_user(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StockNotFound);
    }
}
