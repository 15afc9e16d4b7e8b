//! PaymentHistoryHandler - Query handler for the caller's order list.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::payment::Order;
use crate::ports::OrderRepository;

/// Query for a user's payment history.
#[derive(Debug, Clone)]
pub struct PaymentHistoryQuery {
    pub user_id: UserId,
}

/// Orders newest first.
pub type PaymentHistoryResult = Vec<Order>;

/// Handler for the payment history listing.
pub struct PaymentHistoryHandler {
    orders: Arc<dyn OrderRepository>,
}

impl PaymentHistoryHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(
        &self,
        query: PaymentHistoryQuery,
    ) -> Result<PaymentHistoryResult, DomainError> {
        self.orders.list_for_user(&query.user_id).await
    }
}
