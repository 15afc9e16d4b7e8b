//! Subscription tier definitions.
//!
//! Represents the subscription tier levels available on FlexBit.

use serde::{Deserialize, Serialize};

/// Subscription tier.
///
/// Determines feature access, usage limits, and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTier {
    /// Default tier at registration. No analysis features.
    Free,

    /// Lifetime launch tier. Core analysis and community access.
    Pioneer,

    /// Lifetime tier for the second launch wave.
    /// Pioneer features plus priority support.
    EarlyAdopter,

    /// Annual tier with alerts and data export.
    Growth,

    /// Annual top tier. Everything Growth has, larger limits.
    Pro,
}

/// All tiers, lowest first. Useful for iteration in catalogs and tests.
pub const ALL_TIERS: [UserTier; 5] = [
    UserTier::Free,
    UserTier::Pioneer,
    UserTier::EarlyAdopter,
    UserTier::Growth,
    UserTier::Pro,
];

impl UserTier {
    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, UserTier::Free)
    }

    /// Returns true for tiers that never expire once purchased.
    pub fn is_lifetime(&self) -> bool {
        matches!(self, UserTier::Pioneer | UserTier::EarlyAdopter)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            UserTier::Free => "Free",
            UserTier::Pioneer => "Pioneer",
            UserTier::EarlyAdopter => "Early Adopter",
            UserTier::Growth => "Growth",
            UserTier::Pro => "Pro",
        }
    }

    /// Stable storage/wire name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            UserTier::Free => "free",
            UserTier::Pioneer => "pioneer",
            UserTier::EarlyAdopter => "early_adopter",
            UserTier::Growth => "growth",
            UserTier::Pro => "pro",
        }
    }

    /// Parses a storage/wire name.
    ///
    /// Returns `None` for unrecognized input; callers reading persisted
    /// values fall back to `Free` so corrupted tiers fail safe.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(UserTier::Free),
            "pioneer" => Some(UserTier::Pioneer),
            "early_adopter" => Some(UserTier::EarlyAdopter),
            "growth" => Some(UserTier::Growth),
            "pro" => Some(UserTier::Pro),
            _ => None,
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more features.
    pub fn rank(&self) -> u8 {
        match self {
            UserTier::Free => 0,
            UserTier::Pioneer => 1,
            UserTier::EarlyAdopter => 2,
            UserTier::Growth => 3,
            UserTier::Pro => 4,
        }
    }
}

impl std::fmt::Display for UserTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
