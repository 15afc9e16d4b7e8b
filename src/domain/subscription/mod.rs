//! Subscription domain - tiers, entitlements, pricing and the embedded
//! subscription value object.

mod entitlements;
mod pricing;
mod subscription;
mod tier;
mod tier_limits;

pub use entitlements::{has_permission, Feature};
pub use pricing::{price_for, tier_for_amount};
pub use subscription::{Subscription, SubscriptionStatus};
pub use tier::{UserTier, ALL_TIERS};
pub use tier_limits::{limits_for, SupportLevel, TierLimits};
