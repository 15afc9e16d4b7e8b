//! CreateOrderHandler - Command handler for opening a checkout session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::payment::{Order, OrderId};
use crate::domain::subscription::{price_for, UserTier};
use crate::domain::user::User;
use crate::ports::{CheckoutRequest, OrderRepository, PaymentGateway};

/// Command to start a purchase.
///
/// Carries the already-authenticated principal explicitly; handlers never
/// read ambient request state.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub principal: User,
    pub tier: UserTier,
}

/// Result of a successfully opened checkout session.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order_id: OrderId,
    pub token: String,
    pub redirect_url: String,
}

/// Handler for opening checkout sessions.
///
/// Opens the gateway session first; only if the gateway accepts does it
/// touch persistence, so a gateway failure commits nothing. The
/// invalidate-then-insert pair keeps at most one pending order per user;
/// the unique index on `order_id` backstops the race between two
/// concurrent purchases.
pub struct CreateOrderHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { orders, gateway }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, DomainError> {
        let price = price_for(cmd.tier).ok_or_else(|| {
            DomainError::validation("tier", format!("Tier {} cannot be purchased", cmd.tier))
        })?;

        let now = Timestamp::now();
        let order_id = OrderId::generate(&cmd.principal.id, now);

        let session = self
            .gateway
            .create_checkout(CheckoutRequest {
                order_id: order_id.clone(),
                amount: price,
                tier: cmd.tier,
                customer_name: cmd.principal.full_name.clone(),
                customer_email: cmd.principal.email.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, error = %e, "Checkout session creation failed");
                DomainError::from(e)
            })?;

        let failed = self.orders.fail_pending_for_user(&cmd.principal.id).await?;
        if failed > 0 {
            tracing::info!(
                user_id = %cmd.principal.id,
                count = failed,
                "Superseded pending orders marked failed"
            );
        }

        let order = Order::pending(
            order_id.clone(),
            cmd.principal.id,
            cmd.tier,
            price,
            session.token.clone(),
            now,
        );
        self.orders.insert(&order).await?;

        tracing::info!(order_id = %order_id, tier = %cmd.tier, amount = price, "Order created");

        Ok(CreateOrderResult {
            order_id,
            token: session.token,
            redirect_url: session.redirect_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::payment::test_support::{InMemoryOrderRepository, MockGateway};
    use crate::domain::payment::OrderStatus;

    fn test_principal() -> User {
        User::register(
            "budi@example.com",
            "+628111111111",
            "hash",
            "Budi Santoso",
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn creates_pending_order_with_session_token() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let gateway = Arc::new(MockGateway::accepting());
        let handler = CreateOrderHandler::new(orders.clone(), gateway);

        let principal = test_principal();
        let result = handler
            .handle(CreateOrderCommand {
                principal: principal.clone(),
                tier: UserTier::Growth,
            })
            .await
            .unwrap();

        assert!(!result.token.is_empty());
        let stored = orders.find_by_order_id(&result.order_id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert_eq!(stored.amount, 999_000);
        assert_eq!(stored.user_id, principal.id);
    }

    #[tokio::test]
    async fn free_tier_is_not_purchasable() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let gateway = Arc::new(MockGateway::accepting());
        let handler = CreateOrderHandler::new(orders.clone(), gateway);

        let result = handler
            .handle(CreateOrderCommand {
                principal: test_principal(),
                tier: UserTier::Free,
            })
            .await;

        assert!(result.is_err());
        assert_eq!(orders.len(), 0);
    }

    #[tokio::test]
    async fn prior_pending_orders_are_failed() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let gateway = Arc::new(MockGateway::accepting());
        let handler = CreateOrderHandler::new(orders.clone(), gateway);

        let principal = test_principal();
        let first = handler
            .handle(CreateOrderCommand {
                principal: principal.clone(),
                tier: UserTier::Pioneer,
            })
            .await
            .unwrap();

        let second = handler
            .handle(CreateOrderCommand {
                principal: principal.clone(),
                tier: UserTier::Growth,
            })
            .await
            .unwrap();

        let first_order = orders.find_by_order_id(&first.order_id).await.unwrap().unwrap();
        let second_order = orders.find_by_order_id(&second.order_id).await.unwrap().unwrap();
        assert_eq!(first_order.status, OrderStatus::Failed);
        assert_eq!(second_order.status, OrderStatus::Pending);

        let pending: Vec<_> = orders
            .list_for_user(&principal.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .collect();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_persists_nothing() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let gateway = Arc::new(MockGateway::failing());
        let handler = CreateOrderHandler::new(orders.clone(), gateway);

        let result = handler
            .handle(CreateOrderCommand {
                principal: test_principal(),
                tier: UserTier::Pro,
            })
            .await;

        assert!(result.is_err());
        assert_eq!(orders.len(), 0);
    }
}
