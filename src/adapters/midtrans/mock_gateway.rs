//! Mock payment gateway for local development and integration tests.
//!
//! Accepts every checkout and serves a scriptable status per order, so
//! the full purchase/webhook flow can run without reaching Midtrans.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::payment::{GatewayStatus, OrderId, TransactionStatus};
use crate::ports::{CheckoutRequest, CheckoutSession, GatewayError, PaymentGateway};

/// In-memory stand-in for the Snap gateway.
pub struct MockMidtransGateway {
    statuses: Mutex<HashMap<String, GatewayStatus>>,
}

impl MockMidtransGateway {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(HashMap::new()),
        }
    }

    /// Scripts the status returned for an order id.
    pub fn set_status(&self, order_id: &OrderId, status: GatewayStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert(order_id.as_str().to_string(), status);
    }
}

impl Default for MockMidtransGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockMidtransGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        // Fresh checkouts start pending until a test scripts otherwise.
        self.statuses
            .lock()
            .unwrap()
            .entry(request.order_id.as_str().to_string())
            .or_insert(GatewayStatus {
                transaction_status: TransactionStatus::Pending,
                fraud_status: None,
                gross_amount: format!("{}.00", request.amount),
            });

        Ok(CheckoutSession {
            token: format!("mock-snap-{}", request.order_id.as_str()),
            redirect_url: format!(
                "https://app.sandbox.midtrans.com/snap/v2/vtweb/mock-{}",
                request.order_id.as_str()
            ),
        })
    }

    async fn fetch_status(&self, order_id: &OrderId) -> Result<GatewayStatus, GatewayError> {
        self.statuses
            .lock()
            .unwrap()
            .get(order_id.as_str())
            .cloned()
            .ok_or(GatewayError::NotFound)
    }
}
