//! Subscription value object embedded in the user account.
//!
//! Exactly one subscription per user. Tier transitions happen only through
//! payment reconciliation or an admin edit, never by direct mutation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::UserTier;

/// Subscription lifecycle status.
///
/// Expiry is advisory data: nothing sweeps `Active` subscriptions to
/// `Expired` in the background. Read paths derive an effective tier
/// instead (see [`Subscription::effective_tier`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Canceled,
}

impl SubscriptionStatus {
    /// Stable storage name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Canceled => "canceled",
        }
    }

    /// Parses a storage name.
    ///
    /// Returns `None` for unrecognized input; persistence readers fall
    /// back to `Expired` so a corrupted status denies access.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SubscriptionStatus::Active),
            "expired" => Some(SubscriptionStatus::Expired),
            "canceled" => Some(SubscriptionStatus::Canceled),
            _ => None,
        }
    }
}

/// A user's subscription state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Purchased (or default) tier.
    pub tier: UserTier,

    /// Lifecycle status.
    pub status: SubscriptionStatus,

    /// When this subscription state was established.
    pub start_date: Timestamp,

    /// When access lapses. `None` means non-expiring (lifetime tiers and
    /// the free tier).
    pub expiry_date: Option<Timestamp>,

    /// Order identifier of the payment that produced this state.
    pub payment_id: Option<String>,
}

impl Subscription {
    /// The subscription every account starts with.
    pub fn free(now: Timestamp) -> Self {
        Self {
            tier: UserTier::Free,
            status: SubscriptionStatus::Active,
            start_date: now,
            expiry_date: None,
            payment_id: None,
        }
    }

    /// Subscription state produced by a successful purchase.
    ///
    /// Lifetime tiers never expire; annual tiers run for 365 days.
    pub fn from_purchase(tier: UserTier, payment_id: impl Into<String>, now: Timestamp) -> Self {
        let expiry_date = if tier.is_lifetime() {
            None
        } else {
            Some(now.add_days(365))
        };

        Self {
            tier,
            status: SubscriptionStatus::Active,
            start_date: now,
            expiry_date,
            payment_id: Some(payment_id.into()),
        }
    }

    /// Whether the stored expiry date has passed.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiry_date
            .map(|expiry| expiry.is_before(&now))
            .unwrap_or(false)
    }

    /// Tier that entitlement checks should use right now.
    ///
    /// A subscription that is not Active, or whose expiry date has passed,
    /// grants only what the free tier grants, regardless of the stored tier.
    pub fn effective_tier(&self, now: Timestamp) -> UserTier {
        if self.status != SubscriptionStatus::Active || self.is_expired_at(now) {
            UserTier::Free
        } else {
            self.tier
        }
    }
}
