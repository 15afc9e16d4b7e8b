//! Watchlist aggregate.
//!
//! One watchlist per user. Entry count is bounded by the owner's tier
//! limits, checked at mutation time against the effective tier.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::TierLimits;

/// Price alert configuration for a watchlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default)]
    pub price_above: Option<f64>,
    #[serde(default)]
    pub price_below: Option<f64>,
    pub active: bool,
}

/// A single tracked ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub ticker: String,
    pub added_at: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub alert: Option<AlertConfig>,
}

/// A user's watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    pub user_id: UserId,
    pub name: String,
    pub entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    /// Creates an empty watchlist with the default name.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            name: "My Watchlist".to_string(),
            entries: Vec::new(),
        }
    }

    /// Adds a ticker, enforcing uniqueness and the tier's size limit.
    pub fn add(
        &mut self,
        ticker: impl Into<String>,
        limits: &TierLimits,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let ticker = ticker.into();

        if self.contains(&ticker) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEntry,
                "Stock already in watchlist",
            ));
        }

        if limits.watchlist_limit_reached(self.entries.len() as u32) {
            return Err(DomainError::new(
                ErrorCode::TierLimitReached,
                format!(
                    "Watchlist limit reached ({} stocks). Upgrade to add more.",
                    limits.max_watchlist_size
                ),
            ));
        }

        self.entries.push(WatchlistEntry {
            ticker,
            added_at: now,
            notes: None,
            alert: None,
        });
        Ok(())
    }

    /// Removes a ticker. Removing an absent ticker is a no-op.
    pub fn remove(&mut self, ticker: &str) {
        self.entries.retain(|entry| entry.ticker != ticker);
    }

    /// Sets the alert configuration on an existing entry.
    pub fn configure_alert(
        &mut self,
        ticker: &str,
        alert: AlertConfig,
    ) -> Result<(), DomainError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.ticker == ticker)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::WatchlistEntryNotFound, "Stock not in watchlist")
            })?;
        entry.alert = Some(alert);
        Ok(())
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.iter().any(|entry| entry.ticker == ticker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{limits_for, UserTier};

    fn free_limits() -> TierLimits {
        limits_for(UserTier::Free)
    }

    #[test]
    fn add_appends_entry() {
        let mut watchlist = Watchlist::empty(UserId::new());
        watchlist.add("BBCA", &free_limits(), Timestamp::now()).unwrap();
        assert!(watchlist.contains("BBCA"));
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut watchlist = Watchlist::empty(UserId::new());
        watchlist.add("BBCA", &free_limits(), Timestamp::now()).unwrap();
        let err = watchlist
            .add("BBCA", &free_limits(), Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::DuplicateEntry);
    }

    #[test]
    fn add_beyond_tier_limit_is_rejected() {
        let mut watchlist = Watchlist::empty(UserId::new());
        let limits = free_limits();
        for ticker in ["BBCA", "BBRI", "TLKM", "ASII", "UNVR"] {
            watchlist.add(ticker, &limits, Timestamp::now()).unwrap();
        }

        let err = watchlist.add("GOTO", &limits, Timestamp::now()).unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::TierLimitReached);
        assert_eq!(watchlist.len(), 5);
    }

    #[test]
    fn growth_limit_is_wider_than_free() {
        let mut watchlist = Watchlist::empty(UserId::new());
        let limits = limits_for(UserTier::Growth);
        for i in 0..50 {
            watchlist
                .add(format!("TCK{:02}", i), &limits, Timestamp::now())
                .unwrap();
        }
        assert!(watchlist.add("ONEMORE", &limits, Timestamp::now()).is_err());
    }

    #[test]
    fn remove_deletes_entry() {
        let mut watchlist = Watchlist::empty(UserId::new());
        watchlist.add("BBCA", &free_limits(), Timestamp::now()).unwrap();
        watchlist.remove("BBCA");
        assert!(watchlist.is_empty());
    }

    #[test]
    fn remove_absent_ticker_is_noop() {
        let mut watchlist = Watchlist::empty(UserId::new());
        watchlist.remove("BBCA");
        assert!(watchlist.is_empty());
    }

    #[test]
    fn configure_alert_on_existing_entry() {
        let mut watchlist = Watchlist::empty(UserId::new());
        watchlist.add("BBCA", &free_limits(), Timestamp::now()).unwrap();

        let alert = AlertConfig {
            price_above: Some(10_000.0),
            price_below: None,
            active: true,
        };
        watchlist.configure_alert("BBCA", alert.clone()).unwrap();
        assert_eq!(watchlist.entries[0].alert, Some(alert));
    }

    #[test]
    fn configure_alert_on_missing_entry_fails() {
        let mut watchlist = Watchlist::empty(UserId::new());
        let alert = AlertConfig {
            price_above: None,
            price_below: Some(500.0),
            active: true,
        };
        assert!(watchlist.configure_alert("GOTO", alert).is_err());
    }
}
