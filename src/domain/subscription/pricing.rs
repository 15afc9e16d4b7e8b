//! Tier price catalog.
//!
//! Prices are whole rupiah. The reverse lookup is an exact match with no
//! tolerance: gateway settlement amounts either name a tier or they don't.

use super::UserTier;

/// Purchasable tiers and their prices in IDR.
const PRICES: &[(UserTier, i64)] = &[
    (UserTier::Pioneer, 5_000),
    (UserTier::EarlyAdopter, 599_000),
    (UserTier::Growth, 999_000),
    (UserTier::Pro, 1_999_000),
];

/// Price of a tier in IDR.
///
/// Returns `None` for the free tier, which cannot be purchased.
pub fn price_for(tier: UserTier) -> Option<i64> {
    PRICES
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, price)| *price)
}

/// Reverse lookup: which tier does a settled amount correspond to?
///
/// Exact equality only. An amount matching no catalog price returns `None`
/// and the caller decides how to record the mismatch.
pub fn tier_for_amount(amount: i64) -> Option<UserTier> {
    PRICES
        .iter()
        .find(|(_, price)| *price == amount)
        .map(|(tier, _)| *tier)
}
