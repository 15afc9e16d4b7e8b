//! End-to-end payment flow over in-memory ports.
//!
//! Drives the same handlers the HTTP layer uses: open a checkout, let the
//! (mock) gateway settle it, deliver the signed notification, and watch
//! the entitlements change.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use flexbit_api::adapters::midtrans::MockMidtransGateway;
use flexbit_api::application::handlers::payment::{
    CreateOrderCommand, CreateOrderHandler, ProcessNotificationCommand,
    ProcessNotificationHandler, ReconcileOrderHandler, VerifyOrderCommand, VerifyOrderHandler,
    VerificationStatus,
};
use flexbit_api::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use flexbit_api::domain::payment::{
    compute_signature, FraudStatus, GatewayStatus, NotificationVerifier, Order, OrderId,
    OrderStatus, PaymentNotification, TransactionStatus,
};
use flexbit_api::domain::subscription::{
    has_permission, limits_for, Feature, SubscriptionStatus, UserTier,
};
use flexbit_api::domain::user::User;
use flexbit_api::ports::{OrderRepository, PaymentGateway, UserRepository};

const SERVER_KEY: &str = "SB-Mid-server-integration";

// ════════════════════════════════════════════════════════════════════════════
// In-memory ports
// ════════════════════════════════════════════════════════════════════════════

struct MemoryOrders(Mutex<Vec<Order>>);

impl MemoryOrders {
    fn new() -> Self {
        Self(Mutex::new(Vec::new()))
    }
}

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.0.lock().unwrap();
        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(DomainError::new(ErrorCode::DuplicateEntry, "order id taken"));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.0.lock().unwrap();
        let slot = orders
            .iter_mut()
            .find(|o| o.order_id == order.order_id)
            .ok_or_else(|| DomainError::new(ErrorCode::OrderNotFound, "missing"))?;
        *slot = order.clone();
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|o| &o.order_id == order_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, DomainError> {
        let mut mine: Vec<Order> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn fail_pending_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut count = 0;
        for order in self
            .0
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|o| &o.user_id == user_id && o.status == OrderStatus::Pending)
        {
            order.status = OrderStatus::Failed;
            count += 1;
        }
        Ok(count)
    }

    async fn list_challenged(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.status == OrderStatus::Challenge)
            .cloned()
            .collect())
    }
}

struct MemoryUsers(Mutex<Vec<User>>);

impl MemoryUsers {
    fn new() -> Self {
        Self(Mutex::new(Vec::new()))
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.0.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.0.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "missing"))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.0.lock().unwrap().iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email || u.phone_number == phone)
            .cloned())
    }

    async fn find_by_reset_token_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.reset_token_hash.as_deref() == Some(hash))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.0.lock().unwrap().retain(|u| &u.id != id);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Fixture
// ════════════════════════════════════════════════════════════════════════════

struct Platform {
    orders: Arc<MemoryOrders>,
    users: Arc<MemoryUsers>,
    gateway: Arc<MockMidtransGateway>,
    user: User,
}

impl Platform {
    async fn with_registered_user() -> Self {
        let orders = Arc::new(MemoryOrders::new());
        let users = Arc::new(MemoryUsers::new());
        let gateway = Arc::new(MockMidtransGateway::new());

        let user = User::register(
            "wulan@example.com",
            "+628120001111",
            "argon2-hash",
            "Wulan Sari",
            Timestamp::now(),
        );
        users.save(&user).await.unwrap();

        Self {
            orders,
            users,
            gateway,
            user,
        }
    }

    fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.orders.clone(), self.gateway.clone())
    }

    fn notification_handler(&self) -> ProcessNotificationHandler {
        ProcessNotificationHandler::new(
            NotificationVerifier::new(SERVER_KEY),
            self.gateway.clone(),
            ReconcileOrderHandler::new(self.orders.clone(), self.users.clone()),
        )
    }

    fn verify_handler(&self) -> VerifyOrderHandler {
        VerifyOrderHandler::new(
            self.orders.clone(),
            self.gateway.clone(),
            ReconcileOrderHandler::new(self.orders.clone(), self.users.clone()),
        )
    }

    async fn purchase(&self, tier: UserTier) -> OrderId {
        self.create_order_handler()
            .handle(CreateOrderCommand {
                principal: self.user.clone(),
                tier,
            })
            .await
            .unwrap()
            .order_id
    }

    fn settle_at_gateway(&self, order_id: &OrderId, amount: &str) {
        self.gateway.set_status(
            order_id,
            GatewayStatus {
                transaction_status: TransactionStatus::Settlement,
                fraud_status: None,
                gross_amount: amount.to_string(),
            },
        );
    }

    fn signed_notification(&self, order_id: &OrderId, amount: &str) -> PaymentNotification {
        PaymentNotification {
            order_id: order_id.to_string(),
            status_code: "200".to_string(),
            gross_amount: amount.to_string(),
            signature_key: compute_signature(order_id.as_str(), "200", amount, SERVER_KEY),
            transaction_status: Some("settlement".to_string()),
            fraud_status: None,
        }
    }

    async fn stored_user(&self) -> User {
        self.users.find_by_id(&self.user.id).await.unwrap().unwrap()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scenarios
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn purchase_webhook_entitlement_round_trip() {
    let platform = Platform::with_registered_user().await;

    // Free user: no analysis, 5-slot watchlist.
    let before = platform.stored_user().await;
    let now = Timestamp::now();
    assert!(!has_permission(before.effective_tier(now), Feature::CoreAnalysis));
    assert_eq!(limits_for(before.effective_tier(now)).max_watchlist_size, 5);

    // Purchase growth, gateway settles, webhook arrives.
    let order_id = platform.purchase(UserTier::Growth).await;
    platform.settle_at_gateway(&order_id, "999000.00");
    platform
        .notification_handler()
        .handle(ProcessNotificationCommand {
            notification: platform.signed_notification(&order_id, "999000.00"),
        })
        .await
        .unwrap();

    // Next request sees the new entitlements.
    let after = platform.stored_user().await;
    let tier = after.effective_tier(Timestamp::now());
    assert_eq!(tier, UserTier::Growth);
    assert!(has_permission(tier, Feature::CoreAnalysis));
    assert!(has_permission(tier, Feature::ExportData));
    assert_eq!(limits_for(tier).max_watchlist_size, 50);

    assert_eq!(after.subscription.status, SubscriptionStatus::Active);
    assert_eq!(after.subscription.payment_id.as_deref(), Some(order_id.as_str()));

    let order = platform
        .orders
        .find_by_order_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Success);
}

#[tokio::test]
async fn duplicate_webhook_delivery_does_not_extend_twice() {
    let platform = Platform::with_registered_user().await;

    let order_id = platform.purchase(UserTier::Growth).await;
    platform.settle_at_gateway(&order_id, "999000.00");

    let handler = platform.notification_handler();
    handler
        .handle(ProcessNotificationCommand {
            notification: platform.signed_notification(&order_id, "999000.00"),
        })
        .await
        .unwrap();
    let first = platform.stored_user().await.subscription;

    // At-least-once delivery: the same notification again.
    handler
        .handle(ProcessNotificationCommand {
            notification: platform.signed_notification(&order_id, "999000.00"),
        })
        .await
        .unwrap();
    let second = platform.stored_user().await.subscription;

    assert_eq!(first, second, "expiry must not move on re-delivery");
}

#[tokio::test]
async fn forged_signature_never_mutates_state() {
    let platform = Platform::with_registered_user().await;

    let order_id = platform.purchase(UserTier::Pro).await;
    platform.settle_at_gateway(&order_id, "1999000.00");

    let mut forged = platform.signed_notification(&order_id, "1999000.00");
    forged.signature_key = "0".repeat(128);

    let err = platform
        .notification_handler()
        .handle(ProcessNotificationCommand { notification: forged })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);

    let order = platform
        .orders
        .find_by_order_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(platform.stored_user().await.subscription.tier, UserTier::Free);
}

#[tokio::test]
async fn second_purchase_supersedes_the_first_pending_order() {
    let platform = Platform::with_registered_user().await;

    let first = platform.purchase(UserTier::Pioneer).await;
    let second = platform.purchase(UserTier::Growth).await;

    let orders = platform.orders.list_for_user(&platform.user.id).await.unwrap();
    let pending: Vec<_> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .collect();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].order_id, second);

    let first_order = platform
        .orders
        .find_by_order_id(&first)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first_order.status, OrderStatus::Failed);
}

#[tokio::test]
async fn manual_verification_matches_webhook_semantics() {
    let platform = Platform::with_registered_user().await;

    let order_id = platform.purchase(UserTier::EarlyAdopter).await;

    // Still pending at the gateway.
    let pending = platform
        .verify_handler()
        .handle(VerifyOrderCommand {
            principal: platform.user.clone(),
            order_id: order_id.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(pending.status, VerificationStatus::Pending);

    // After settlement the same endpoint applies the same transition the
    // webhook would have.
    platform.settle_at_gateway(&order_id, "599000.00");
    let verified = platform
        .verify_handler()
        .handle(VerifyOrderCommand {
            principal: platform.user.clone(),
            order_id: order_id.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(verified.status, VerificationStatus::Success);

    let user = platform.stored_user().await;
    assert_eq!(user.subscription.tier, UserTier::EarlyAdopter);
    assert!(user.subscription.expiry_date.is_none(), "lifetime tier");
}

#[tokio::test]
async fn challenge_hold_then_settlement_upgrades_once() {
    let platform = Platform::with_registered_user().await;

    let order_id = platform.purchase(UserTier::Growth).await;
    platform.gateway.set_status(
        &order_id,
        GatewayStatus {
            transaction_status: TransactionStatus::Capture,
            fraud_status: Some(FraudStatus::Challenge),
            gross_amount: "999000.00".to_string(),
        },
    );

    platform
        .notification_handler()
        .handle(ProcessNotificationCommand {
            notification: platform.signed_notification(&order_id, "999000.00"),
        })
        .await
        .unwrap();

    // Held for review: queryable, no subscription change.
    let challenged = platform.orders.list_challenged().await.unwrap();
    assert_eq!(challenged.len(), 1);
    assert_eq!(platform.stored_user().await.subscription.tier, UserTier::Free);

    // Review resolves; settlement arrives.
    platform.settle_at_gateway(&order_id, "999000.00");
    platform
        .notification_handler()
        .handle(ProcessNotificationCommand {
            notification: platform.signed_notification(&order_id, "999000.00"),
        })
        .await
        .unwrap();

    assert_eq!(
        platform.stored_user().await.subscription.tier,
        UserTier::Growth
    );
    assert!(platform.orders.list_challenged().await.unwrap().is_empty());
}
