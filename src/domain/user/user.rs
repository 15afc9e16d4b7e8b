//! User aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{Subscription, UserTier};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parses a storage name. Unknown input fails safe to `User`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// Per-user preference bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            notifications: true,
        }
    }
}

/// A registered account.
///
/// # Invariants
///
/// - `email` and `phone_number` are each globally unique (database indexes)
/// - exactly one embedded [`Subscription`]; its tier changes only through
///   payment reconciliation or an admin edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub subscription: Subscription,
    pub preferences: Preferences,

    /// SHA-256 of the outstanding password reset token, if any.
    pub reset_token_hash: Option<String>,
    pub reset_token_expires: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a new account with a free, active subscription.
    pub fn register(
        email: impl Into<String>,
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            phone_number: phone_number.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            role: Role::User,
            subscription: Subscription::free(now),
            preferences: Preferences::default(),
            reset_token_hash: None,
            reset_token_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Tier that entitlement checks should use right now.
    pub fn effective_tier(&self, now: Timestamp) -> UserTier {
        self.subscription.effective_tier(now)
    }

    /// Replaces the subscription. Callers are the payment reconciler and
    /// the admin user edit; nothing else writes this field.
    pub fn replace_subscription(&mut self, subscription: Subscription, now: Timestamp) {
        self.subscription = subscription;
        self.updated_at = now;
    }

    /// Updates profile fields that the user may edit.
    pub fn update_profile(
        &mut self,
        full_name: Option<String>,
        phone_number: Option<String>,
        now: Timestamp,
    ) {
        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = phone_number;
        }
        self.updated_at = now;
    }

    /// Replaces the password hash.
    pub fn change_password(&mut self, password_hash: impl Into<String>, now: Timestamp) {
        self.password_hash = password_hash.into();
        self.updated_at = now;
    }

    /// Stores a hashed password reset token with its expiry.
    pub fn set_reset_token(&mut self, token_hash: impl Into<String>, expires: Timestamp, now: Timestamp) {
        self.reset_token_hash = Some(token_hash.into());
        self.reset_token_expires = Some(expires);
        self.updated_at = now;
    }

    /// Clears any outstanding reset token.
    pub fn clear_reset_token(&mut self, now: Timestamp) {
        self.reset_token_hash = None;
        self.reset_token_expires = None;
        self.updated_at = now;
    }

    /// Checks a hashed token against the stored one, including expiry.
    pub fn reset_token_matches(&self, token_hash: &str, now: Timestamp) -> bool {
        match (&self.reset_token_hash, &self.reset_token_expires) {
            (Some(stored), Some(expires)) => stored == token_hash && !expires.is_before(&now),
            _ => false,
        }
    }
}
