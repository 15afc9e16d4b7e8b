//! Tier-based numeric limits.
//!
//! A lookup table keyed by tier with a single explicit fallback entry, so
//! the "fail safe to most restrictive" rule is auditable in one place.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::UserTier;

/// Support queue level attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    None,
    Community,
    Priority,
    PriorityVip,
}

/// Numeric limits for a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum number of watchlist entries.
    pub max_watchlist_size: u32,
    /// Whether CSV export is enabled.
    pub can_export: bool,
    /// Support queue level.
    pub support_level: SupportLevel,
}

impl TierLimits {
    /// Check if the watchlist limit has been reached.
    pub fn watchlist_limit_reached(&self, current_entries: u32) -> bool {
        current_entries >= self.max_watchlist_size
    }
}

/// The most restrictive limits.
///
/// Applied to the free tier and to any tier value the table does not name,
/// so an unrecognized or corrupted tier never widens access.
const FALLBACK_LIMITS: TierLimits = TierLimits {
    max_watchlist_size: 5,
    can_export: false,
    support_level: SupportLevel::None,
};

/// Limits per paid tier.
///
/// | Tier | Watchlist | Export | Support |
/// |------|-----------|--------|---------|
/// | pioneer / early_adopter | 20 | No | community |
/// | growth | 50 | Yes | priority |
/// | pro | 9999 | Yes | priority_vip |
static LIMITS: Lazy<HashMap<UserTier, TierLimits>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        UserTier::Pioneer,
        TierLimits {
            max_watchlist_size: 20,
            can_export: false,
            support_level: SupportLevel::Community,
        },
    );
    map.insert(
        UserTier::EarlyAdopter,
        TierLimits {
            max_watchlist_size: 20,
            can_export: false,
            support_level: SupportLevel::Community,
        },
    );
    map.insert(
        UserTier::Growth,
        TierLimits {
            max_watchlist_size: 50,
            can_export: true,
            support_level: SupportLevel::Priority,
        },
    );
    map.insert(
        UserTier::Pro,
        TierLimits {
            // Effectively unlimited
            max_watchlist_size: 9999,
            can_export: true,
            support_level: SupportLevel::PriorityVip,
        },
    );
    map
});

/// Resolve the limits for a tier.
///
/// Total over all tiers; anything not named in the table gets the fallback.
pub fn limits_for(tier: UserTier) -> TierLimits {
    LIMITS.get(&tier).copied().unwrap_or(FALLBACK_LIMITS)
}
