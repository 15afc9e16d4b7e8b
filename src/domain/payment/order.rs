//! Order aggregate - one purchase attempt and its lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp, UserId};
use crate::domain::subscription::UserTier;

use super::OrderId;

/// Lifecycle status of an order.
///
/// `Challenge` records a gateway fraud-review hold so held orders stay
/// queryable for manual review instead of sitting silently in `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Checkout session opened, payment not yet concluded.
    Pending,

    /// Payment settled. Terminal.
    Success,

    /// Payment cancelled, denied, expired, or superseded. Terminal.
    Failed,

    /// Captured but held by the gateway's fraud review.
    Challenge,
}

impl OrderStatus {
    /// Stable storage name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Success => "success",
            OrderStatus::Failed => "failed",
            OrderStatus::Challenge => "challenge",
        }
    }

    /// Parses a storage name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "success" => Some(OrderStatus::Success),
            "failed" => Some(OrderStatus::Failed),
            "challenge" => Some(OrderStatus::Challenge),
            _ => None,
        }
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Success)
                | (Pending, Failed)
                | (Pending, Challenge)
                | (Challenge, Success)
                | (Challenge, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Success, Failed, Challenge],
            Challenge => vec![Success, Failed],
            Success => vec![],
            Failed => vec![],
        }
    }
}

/// One purchase attempt.
///
/// # Invariants
///
/// - `order_id` is globally unique (database unique index)
/// - at most one `Pending` order per user; creating a new order fails all
///   prior pending orders for that user first
/// - fields other than `status` and `updated_at` are append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Opaque identifier shared with the payment gateway.
    pub order_id: OrderId,

    /// Purchasing user.
    pub user_id: UserId,

    /// Requested tier.
    pub tier: UserTier,

    /// Price at purchase time, IDR.
    pub amount: i64,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Gateway checkout session token.
    pub snap_token: String,

    /// When the order was created.
    pub created_at: Timestamp,

    /// When the order was last updated.
    pub updated_at: Timestamp,
}

impl Order {
    /// Creates a new pending order for a freshly opened checkout session.
    pub fn pending(
        order_id: OrderId,
        user_id: UserId,
        tier: UserTier,
        amount: i64,
        snap_token: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            order_id,
            user_id,
            tier,
            amount,
            status: OrderStatus::Pending,
            snap_token: snap_token.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the order settled.
    pub fn mark_success(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(OrderStatus::Success, now)
    }

    /// Marks the order failed.
    pub fn mark_failed(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(OrderStatus::Failed, now)
    }

    /// Records a gateway fraud-review hold.
    pub fn hold_for_review(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(OrderStatus::Challenge, now)
    }

    /// True once the order has reached `Success`.
    pub fn is_settled(&self) -> bool {
        self.status == OrderStatus::Success
    }

    fn transition_to(&mut self, target: OrderStatus, now: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition order from {:?} to {:?}", self.status, target),
            )
        })?;
        self.updated_at = now;
        Ok(())
    }
}
