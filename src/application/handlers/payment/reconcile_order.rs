//! ReconcileOrderHandler - applies an authoritative gateway status to an
//! order and, on settlement, to the owner's subscription.
//!
//! Both the webhook path and the manual verification path run through this
//! handler, so the decision table has exactly one implementation.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::payment::{decide, GatewayStatus, OrderId, ReconcileAction, TransactionStatus};
use crate::domain::subscription::{tier_for_amount, Subscription, UserTier};
use crate::ports::{OrderRepository, UserRepository};

/// Outcome of applying a gateway status to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Order settled and the subscription was upgraded.
    SubscriptionUpdated { tier: UserTier },
    /// Order was already settled; nothing changed (idempotent re-delivery).
    AlreadySettled,
    /// Order settled but the gross amount matched no catalog price;
    /// the subscription was deliberately left untouched.
    SettledWithoutTier,
    /// Order marked failed.
    OrderFailed,
    /// Order held for fraud review.
    ChallengeHeld,
    /// Gateway still reports the payment as pending.
    StillPending,
    /// Status carried nothing this application acts on.
    NoChange,
}

/// Handler applying the reconciliation decision table.
pub struct ReconcileOrderHandler {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReconcileOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { orders, users }
    }

    /// Applies `status` to the order identified by `order_id`.
    ///
    /// Re-applying a settled status to an already-settled order is a no-op:
    /// gateways deliver webhooks at least once, and a duplicate must not
    /// extend the subscription a second time.
    pub async fn apply(
        &self,
        order_id: &OrderId,
        status: &GatewayStatus,
    ) -> Result<ReconcileOutcome, DomainError> {
        match decide(status) {
            ReconcileAction::ApplySuccess => self.apply_success(order_id, status).await,
            ReconcileAction::MarkFailed => self.mark_failed(order_id).await,
            ReconcileAction::HoldChallenge => self.hold_challenge(order_id).await,
            ReconcileAction::NoOp => {
                if status.transaction_status == TransactionStatus::Pending {
                    Ok(ReconcileOutcome::StillPending)
                } else {
                    tracing::debug!(order_id = %order_id, status = ?status.transaction_status, "No action for gateway status");
                    Ok(ReconcileOutcome::NoChange)
                }
            }
        }
    }

    async fn apply_success(
        &self,
        order_id: &OrderId,
        status: &GatewayStatus,
    ) -> Result<ReconcileOutcome, DomainError> {
        let mut order = self.load_order(order_id).await?;

        if order.is_settled() {
            tracing::info!(order_id = %order_id, "Duplicate settlement notification ignored");
            return Ok(ReconcileOutcome::AlreadySettled);
        }

        let now = Timestamp::now();
        order.mark_success(now)?;
        self.orders.update(&order).await?;

        // The tier comes from the authoritative amount, not the webhook body
        // and not the order row, so a tampered or stale record can't widen
        // the grant.
        let tier = status.amount().and_then(tier_for_amount);
        let Some(tier) = tier else {
            tracing::warn!(
                order_id = %order_id,
                gross_amount = %status.gross_amount,
                "Settled amount matches no catalog price; subscription left unchanged"
            );
            return Ok(ReconcileOutcome::SettledWithoutTier);
        };

        let mut user = self
            .users
            .find_by_id(&order.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UserNotFound, "Order owner no longer exists")
            })?;

        user.replace_subscription(
            Subscription::from_purchase(tier, order_id.as_str(), now),
            now,
        );
        self.users.update(&user).await?;

        tracing::info!(order_id = %order_id, user_id = %user.id, tier = %tier, "Subscription upgraded");
        Ok(ReconcileOutcome::SubscriptionUpdated { tier })
    }

    async fn mark_failed(&self, order_id: &OrderId) -> Result<ReconcileOutcome, DomainError> {
        let mut order = self.load_order(order_id).await?;

        let now = Timestamp::now();
        match order.mark_failed(now) {
            Ok(()) => {
                self.orders.update(&order).await?;
                tracing::info!(order_id = %order_id, "Order marked failed");
                Ok(ReconcileOutcome::OrderFailed)
            }
            Err(_) => {
                // Terminal already (e.g. a late cancel after settlement).
                tracing::warn!(order_id = %order_id, status = ?order.status, "Failure notification for terminal order ignored");
                Ok(ReconcileOutcome::NoChange)
            }
        }
    }

    async fn hold_challenge(&self, order_id: &OrderId) -> Result<ReconcileOutcome, DomainError> {
        let mut order = self.load_order(order_id).await?;

        let now = Timestamp::now();
        match order.hold_for_review(now) {
            Ok(()) => {
                self.orders.update(&order).await?;
                tracing::warn!(order_id = %order_id, "Order held for fraud review");
                Ok(ReconcileOutcome::ChallengeHeld)
            }
            Err(_) => {
                // Already held or already terminal; keep whatever stands.
                tracing::debug!(order_id = %order_id, status = ?order.status, "Challenge notification left order unchanged");
                Ok(ReconcileOutcome::ChallengeHeld)
            }
        }
    }

    async fn load_order(
        &self,
        order_id: &OrderId,
    ) -> Result<crate::domain::payment::Order, DomainError> {
        self.orders
            .find_by_order_id(order_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::OrderNotFound, "Unknown order id"))
    }
}
