//! Payment gateway port.
//!
//! Contract for the hosted-checkout provider. Implementations open
//! checkout sessions and answer authoritative status queries; they never
//! interpret webhook bodies (that is the reconciler's job).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::{GatewayStatus, OrderId};
use crate::domain::subscription::UserTier;

/// Port for the external payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session.
    ///
    /// Returns the session token and redirect URL the client resumes
    /// checkout with.
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError>;

    /// Fetch the authoritative status of a transaction by order id.
    ///
    /// This is the source of truth the reconciler acts on; webhook bodies
    /// are only a trigger.
    async fn fetch_status(&self, order_id: &OrderId) -> Result<GatewayStatus, GatewayError>;
}

/// Request to open a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Order identifier shared with the gateway.
    pub order_id: OrderId,

    /// Gross amount in IDR.
    pub amount: i64,

    /// Tier being purchased (line item description).
    pub tier: UserTier,

    /// Buyer's display name.
    pub customer_name: String,

    /// Buyer's email.
    pub customer_email: String,
}

/// An open checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Gateway session token (persisted on the order).
    pub token: String,

    /// URL for the customer to complete checkout.
    pub redirect_url: String,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway unreachable: {0}")]
    Network(String),

    #[error("Gateway rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Gateway response could not be parsed: {0}")]
    InvalidResponse(String),

    #[error("Transaction not found at the gateway")]
    NotFound,
}

impl GatewayError {
    /// Whether retrying the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        let code = match err {
            GatewayError::NotFound => ErrorCode::OrderNotFound,
            _ => ErrorCode::PaymentGatewayError,
        };
        DomainError::new(code, err.to_string())
    }
}
