//! Watchlist handlers.
//!
//! ## Commands
//! - Adding stocks (tier-limited)
//! - Removing stocks
//! - Configuring price alerts (Growth/Pro)
//!
//! ## Queries
//! - Enriched watchlist view

mod add_stock;
mod configure_alert;
mod get_watchlist;
mod remove_stock;

pub use add_stock::{AddStockCommand, AddStockHandler};
pub use configure_alert::{ConfigureAlertCommand, ConfigureAlertHandler};
pub use get_watchlist::{
    GetWatchlistHandler, GetWatchlistQuery, WatchlistEntryView, WatchlistView,
};
pub use remove_stock::{RemoveStockCommand, RemoveStockHandler};
