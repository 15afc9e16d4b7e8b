//! Feature entitlement evaluation.
//!
//! Pure tier-to-feature lookups. No I/O, safe to call on every request.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::UserTier;

/// Gated platform features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Narrative, VQSG and screener analysis.
    CoreAnalysis,
    /// Community channels.
    CommunityAccess,
    /// Price alerts on watchlist entries.
    WatchlistAlerts,
    /// CSV export of stock and watchlist data.
    ExportData,
    /// Priority support queue.
    PrioritySupport,
    /// Entry/exit timing labels on analysis views.
    TimingLabels,
}

/// Feature sets per tier.
///
/// Tiers missing from this table (and any unrecognized tier) resolve to the
/// empty set, so corrupted values deny rather than grant.
static PERMISSIONS: Lazy<HashMap<UserTier, &'static [Feature]>> = Lazy::new(|| {
    use Feature::*;

    let mut map: HashMap<UserTier, &'static [Feature]> = HashMap::new();
    map.insert(UserTier::Free, &[]);
    map.insert(
        UserTier::Pioneer,
        &[CoreAnalysis, CommunityAccess, TimingLabels],
    );
    map.insert(
        UserTier::EarlyAdopter,
        &[CoreAnalysis, CommunityAccess, TimingLabels, PrioritySupport],
    );
    map.insert(
        UserTier::Growth,
        &[
            CoreAnalysis,
            CommunityAccess,
            TimingLabels,
            WatchlistAlerts,
            ExportData,
            PrioritySupport,
        ],
    );
    map.insert(
        UserTier::Pro,
        &[
            CoreAnalysis,
            CommunityAccess,
            TimingLabels,
            WatchlistAlerts,
            ExportData,
            PrioritySupport,
        ],
    );
    map
});

/// Checks whether a tier grants a feature.
pub fn has_permission(tier: UserTier, feature: Feature) -> bool {
    PERMISSIONS
        .get(&tier)
        .map(|features| features.contains(&feature))
        .unwrap_or(false)
}
