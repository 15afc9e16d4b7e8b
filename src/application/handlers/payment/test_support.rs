//! In-memory ports for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::payment::{GatewayStatus, Order, OrderId, OrderStatus, TransactionStatus};
use crate::domain::user::User;
use crate::ports::{
    CheckoutRequest, CheckoutSession, GatewayError, OrderRepository, PaymentGateway,
    UserRepository,
};

/// Vec-backed order store.
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(DomainError::new(ErrorCode::DuplicateEntry, "order id taken"));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let slot = orders
            .iter_mut()
            .find(|o| o.order_id == order.order_id)
            .ok_or_else(|| DomainError::new(ErrorCode::OrderNotFound, "no such order"))?;
        *slot = order.clone();
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| &o.order_id == order_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, DomainError> {
        let mut mine: Vec<Order> = self
            .orders
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
        let mut orders = self.orders.lock().unwrap();
        let mut count = 0;
        for order in orders
            .iter_mut()
            .filter(|o| &o.user_id == user_id && o.status == OrderStatus::Pending)
        {
            order.status = OrderStatus::Failed;
            count += 1;
        }
        Ok(count)
    }

    async fn list_challenged(&self) -> Result<Vec<Order>, DomainError> {
        let mut held: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.status == OrderStatus::Challenge)
            .cloned()
            .collect();
        held.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(held)
    }
}

/// Vec-backed user store.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == user.email || u.phone_number == user.phone_number)
        {
            return Err(DomainError::new(ErrorCode::DuplicateEntry, "email or phone taken"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "no such user"))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email || u.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() == before {
            return Err(DomainError::new(ErrorCode::UserNotFound, "no such user"));
        }
        Ok(())
    }
}

/// Scriptable gateway double.
pub struct MockGateway {
    checkout_fails: bool,
    status: Mutex<GatewayStatus>,
}

impl MockGateway {
    /// Accepts checkouts; status queries report pending.
    pub fn accepting() -> Self {
        Self {
            checkout_fails: false,
            status: Mutex::new(GatewayStatus {
                transaction_status: TransactionStatus::Pending,
                fraud_status: None,
                gross_amount: "0".to_string(),
            }),
        }
    }

    /// Every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            checkout_fails: true,
            status: Mutex::new(GatewayStatus {
                transaction_status: TransactionStatus::Pending,
                fraud_status: None,
                gross_amount: "0".to_string(),
            }),
        }
    }

    /// Accepts checkouts; status queries report the given snapshot.
    pub fn with_status(status: GatewayStatus) -> Self {
        Self {
            checkout_fails: false,
            status: Mutex::new(status),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        if self.checkout_fails {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(CheckoutSession {
            token: format!("snap-{}", request.order_id.as_str()),
            redirect_url: format!("https://checkout.test/{}", request.order_id.as_str()),
        })
    }

    async fn fetch_status(&self, _order_id: &OrderId) -> Result<GatewayStatus, GatewayError> {
        if self.checkout_fails {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(self.status.lock().unwrap().clone())
    }
}
