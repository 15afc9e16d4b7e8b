//! Watchlist domain.

mod watchlist;

pub use watchlist::{AlertConfig, Watchlist, WatchlistEntry};
