//! RemoveStockHandler - Command handler for removing a watchlist entry.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::domain::watchlist::Watchlist;
use crate::ports::WatchlistRepository;

/// Command to remove a ticker from the caller's watchlist.
#[derive(Debug, Clone)]
pub struct RemoveStockCommand {
    pub principal: User,
    pub ticker: String,
}

/// Handler for watchlist removals.
pub struct RemoveStockHandler {
    watchlists: Arc<dyn WatchlistRepository>,
}

impl RemoveStockHandler {
    pub fn new(watchlists: Arc<dyn WatchlistRepository>) -> Self {
        Self { watchlists }
    }

    pub async fn handle(&self, cmd: RemoveStockCommand) -> Result<Watchlist, DomainError> {
        let mut watchlist = self
            .watchlists
            .find_by_user(&cmd.principal.id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::WatchlistEntryNotFound, "Watchlist not found")
            })?;

        watchlist.remove(&cmd.ticker.trim().to_uppercase());
        self.watchlists.save(&watchlist).await?;
        Ok(watchlist)
    }
}
