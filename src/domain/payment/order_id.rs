//! Opaque order identifier.
//!
//! Shape: `flxbt-<user uuid, 32 hex chars>-<epoch millis>`. The embedded
//! user id lets a gateway callback be routed back to a user without a
//! database round trip. It is informational only: the webhook signature
//! check is the trust boundary, and parsed owner ids must never be used
//! for authorization.
//!
//! Two orders for the same user created in the same millisecond collide.
//! The scheme does not defend against that; the unique index on the
//! persisted `order_id` column does, by failing the second insert loudly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

const PREFIX: &str = "flxbt";

/// Opaque order identifier correlating checkout sessions, persisted orders
/// and gateway callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Builds the identifier for a new order.
    pub fn generate(user_id: &UserId, at: Timestamp) -> Self {
        Self(format!(
            "{}-{}-{}",
            PREFIX,
            user_id.as_simple(),
            at.epoch_millis()
        ))
    }

    /// Parses and validates an identifier received from outside.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let mut parts = s.split('-');

        let prefix = parts.next().unwrap_or_default();
        if prefix != PREFIX {
            return Err(ValidationError::invalid_format("order_id", "unknown prefix"));
        }

        let user_part = parts
            .next()
            .ok_or_else(|| ValidationError::invalid_format("order_id", "missing user segment"))?;
        UserId::parse(user_part)
            .map_err(|_| ValidationError::invalid_format("order_id", "user segment is not a UUID"))?;

        let millis_part = parts
            .next()
            .ok_or_else(|| ValidationError::invalid_format("order_id", "missing timestamp segment"))?;
        millis_part
            .parse::<i64>()
            .map_err(|_| ValidationError::invalid_format("order_id", "timestamp segment is not numeric"))?;

        if parts.next().is_some() {
            return Err(ValidationError::invalid_format("order_id", "too many segments"));
        }

        Ok(Self(s.to_string()))
    }

    /// The user id embedded at generation time.
    ///
    /// Routing hint only. Never an authorization input.
    pub fn owner_hint(&self) -> Option<UserId> {
        self.0
            .split('-')
            .nth(1)
            .and_then(|part| UserId::parse(part).ok())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
