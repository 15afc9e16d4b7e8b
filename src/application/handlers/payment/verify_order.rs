//! VerifyOrderHandler - synchronous re-check of an order's status.
//!
//! Fallback for environments where the gateway cannot reach a public
//! webhook URL. Applies the same reconciliation handler as the webhook
//! path; only the response shape differs. The HTTP layer disables this
//! endpoint in production.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::OrderId;
use crate::domain::user::User;
use crate::ports::{OrderRepository, PaymentGateway};

use super::reconcile_order::{ReconcileOrderHandler, ReconcileOutcome};

/// Command to verify one of the caller's orders.
#[derive(Debug, Clone)]
pub struct VerifyOrderCommand {
    pub principal: User,
    pub order_id: String,
}

/// Caller-facing verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Success,
    Pending,
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Success => "success",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Failed => "failed",
        }
    }
}

/// Result of a manual verification.
#[derive(Debug, Clone)]
pub struct VerifyOrderResult {
    pub status: VerificationStatus,
    pub message: String,
}

/// Handler for manual order verification.
pub struct VerifyOrderHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    reconciler: ReconcileOrderHandler,
}

impl VerifyOrderHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
        reconciler: ReconcileOrderHandler,
    ) -> Self {
        Self {
            orders,
            gateway,
            reconciler,
        }
    }

    pub async fn handle(&self, cmd: VerifyOrderCommand) -> Result<VerifyOrderResult, DomainError> {
        let order_id = OrderId::parse(&cmd.order_id)
            .map_err(|e| DomainError::validation("orderId", e.to_string()))?;

        // Ownership comes from the persisted order, not from the id's
        // embedded hint.
        let order = self
            .orders
            .find_by_order_id(&order_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::OrderNotFound, "Order not found"))?;
        if order.user_id != cmd.principal.id {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Order belongs to another account",
            ));
        }

        let status = self.gateway.fetch_status(&order_id).await.map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Manual verification status fetch failed");
            DomainError::from(e)
        })?;

        tracing::info!(
            order_id = %order_id,
            transaction_status = ?status.transaction_status,
            "Manual verification"
        );

        let outcome = self.reconciler.apply(&order_id, &status).await?;
        Ok(Self::to_result(outcome))
    }

    fn to_result(outcome: ReconcileOutcome) -> VerifyOrderResult {
        let (status, message) = match outcome {
            ReconcileOutcome::SubscriptionUpdated { .. } | ReconcileOutcome::AlreadySettled => {
                (VerificationStatus::Success, "Payment verified")
            }
            ReconcileOutcome::SettledWithoutTier => (
                VerificationStatus::Success,
                "Payment verified; subscription pending manual correction",
            ),
            ReconcileOutcome::ChallengeHeld => (VerificationStatus::Pending, "Payment challenged"),
            ReconcileOutcome::StillPending => (VerificationStatus::Pending, "Payment pending"),
            ReconcileOutcome::OrderFailed => {
                (VerificationStatus::Failed, "Payment failed or expired")
            }
            ReconcileOutcome::NoChange => (VerificationStatus::Failed, "Payment not completed"),
        };
        VerifyOrderResult {
            status,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::payment::test_support::{
        InMemoryOrderRepository, InMemoryUserRepository, MockGateway,
    };
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::{GatewayStatus, Order, TransactionStatus};
    use crate::domain::subscription::UserTier;
    use crate::ports::UserRepository;

    async fn fixture(
        status: GatewayStatus,
    ) -> (VerifyOrderHandler, User, OrderId, Arc<InMemoryUserRepository>) {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        let user = User::register(
            "agus@example.com",
            "+628444444444",
            "hash",
            "Agus Wijaya",
            Timestamp::now(),
        );
        users.save(&user).await.unwrap();

        let now = Timestamp::now();
        let order_id = OrderId::generate(&user.id, now);
        let order = Order::pending(order_id.clone(), user.id, UserTier::Growth, 999_000, "tok", now);
        orders.insert(&order).await.unwrap();

        let gateway = Arc::new(MockGateway::with_status(status));
        let handler = VerifyOrderHandler::new(
            orders.clone(),
            gateway,
            ReconcileOrderHandler::new(orders, users.clone()),
        );
        (handler, user, order_id, users)
    }

    fn status(ts: TransactionStatus) -> GatewayStatus {
        GatewayStatus {
            transaction_status: ts,
            fraud_status: None,
            gross_amount: "999000.00".to_string(),
        }
    }

    #[tokio::test]
    async fn settled_order_reports_success_and_upgrades() {
        let (handler, user, order_id, users) = fixture(status(TransactionStatus::Settlement)).await;

        let result = handler
            .handle(VerifyOrderCommand {
                principal: user.clone(),
                order_id: order_id.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.status, VerificationStatus::Success);
        let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.subscription.tier, UserTier::Growth);
    }

    #[tokio::test]
    async fn pending_order_reports_pending() {
        let (handler, user, order_id, _) = fixture(status(TransactionStatus::Pending)).await;

        let result = handler
            .handle(VerifyOrderCommand {
                principal: user,
                order_id: order_id.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.status, VerificationStatus::Pending);
    }

    #[tokio::test]
    async fn expired_order_reports_failed() {
        let (handler, user, order_id, _) = fixture(status(TransactionStatus::Expire)).await;

        let result = handler
            .handle(VerifyOrderCommand {
                principal: user,
                order_id: order_id.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.status, VerificationStatus::Failed);
    }

    #[tokio::test]
    async fn foreign_order_is_forbidden() {
        let (handler, _owner, order_id, users) = fixture(status(TransactionStatus::Settlement)).await;

        let stranger = User::register(
            "lain@example.com",
            "+628555555555",
            "hash",
            "Orang Lain",
            Timestamp::now(),
        );
        users.save(&stranger).await.unwrap();

        let err = handler
            .handle(VerifyOrderCommand {
                principal: stranger,
                order_id: order_id.to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn malformed_order_id_is_rejected() {
        let (handler, user, _, _) = fixture(status(TransactionStatus::Settlement)).await;

        let err = handler
            .handle(VerifyOrderCommand {
                principal: user,
                order_id: "garbage".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
