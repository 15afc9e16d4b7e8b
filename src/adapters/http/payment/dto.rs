//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::{CreateOrderResult, VerifyOrderResult};
use crate::domain::payment::{Order, OrderStatus};
use crate::domain::subscription::UserTier;

/// Request to open a checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// The tier to purchase (free is rejected).
    pub tier: UserTier,
}

/// Checkout session response consumed by the web client.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub token: String,
    pub redirect_url: String,
}

impl From<CreateOrderResult> for CreateOrderResponse {
    fn from(result: CreateOrderResult) -> Self {
        Self {
            token: result.token,
            redirect_url: result.redirect_url,
        }
    }
}

/// Request to manually verify an order.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOrderRequest {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Manual verification response.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOrderResponse {
    pub status: String,
    pub message: String,
}

impl From<VerifyOrderResult> for VerifyOrderResponse {
    fn from(result: VerifyOrderResult) -> Self {
        Self {
            status: result.status.as_str().to_string(),
            message: result.message,
        }
    }
}

/// One order in the payment history.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub tier: UserTier,
    pub amount: i64,
    pub status: OrderStatus,
    pub snap_token: String,
    /// ISO 8601.
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            tier: order.tier,
            amount: order.amount,
            status: order.status,
            snap_token: order.snap_token,
            created_at: order.created_at.as_datetime().to_rfc3339(),
            updated_at: order.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_request_takes_wire_tier_names() {
        let req: CreateOrderRequest = serde_json::from_str(r#"{"tier":"early_adopter"}"#).unwrap();
        assert_eq!(req.tier, UserTier::EarlyAdopter);
    }

    #[test]
    fn verify_request_uses_camel_case_order_id() {
        let req: VerifyOrderRequest =
            serde_json::from_str(r#"{"orderId":"flxbt-x-1"}"#).unwrap();
        assert_eq!(req.order_id, "flxbt-x-1");
    }
}
