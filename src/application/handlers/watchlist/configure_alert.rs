//! ConfigureAlertHandler - Command handler for watchlist price alerts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::{has_permission, Feature};
use crate::domain::user::User;
use crate::domain::watchlist::{AlertConfig, Watchlist};
use crate::ports::WatchlistRepository;

/// Command to set the alert config on a watchlist entry.
#[derive(Debug, Clone)]
pub struct ConfigureAlertCommand {
    pub principal: User,
    pub ticker: String,
    pub alert: AlertConfig,
}

/// Handler for alert configuration. Growth/Pro feature.
pub struct ConfigureAlertHandler {
    watchlists: Arc<dyn WatchlistRepository>,
}

impl ConfigureAlertHandler {
    pub fn new(watchlists: Arc<dyn WatchlistRepository>) -> Self {
        Self { watchlists }
    }

    pub async fn handle(&self, cmd: ConfigureAlertCommand) -> Result<Watchlist, DomainError> {
        let now = Timestamp::now();
        let tier = cmd.principal.effective_tier(now);
        if !has_permission(tier, Feature::WatchlistAlerts) {
            return Err(DomainError::new(
                ErrorCode::FeatureLocked,
                format!("Alerts are locked for the {} tier. Upgrade to Growth or Pro.", tier),
            ));
        }

        let mut watchlist = self
            .watchlists
            .find_by_user(&cmd.principal.id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::WatchlistEntryNotFound, "Watchlist not found")
            })?;

        watchlist.configure_alert(&cmd.ticker.trim().to_uppercase(), cmd.alert)?;
        self.watchlists.save(&watchlist).await?;
        Ok(watchlist)
    }
}
