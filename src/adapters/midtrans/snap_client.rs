//! Midtrans Snap gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Snap API (checkout
//! session creation) and the core API (authoritative status lookups).
//! Authentication is HTTP basic with the server key as username.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::PaymentConfig;
use crate::domain::payment::{FraudStatus, GatewayStatus, OrderId, TransactionStatus};
use crate::domain::subscription::price_for;
use crate::ports::{CheckoutRequest, CheckoutSession, GatewayError, PaymentGateway};

/// Midtrans Snap client.
pub struct MidtransGateway {
    server_key: SecretString,
    snap_base_url: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl MidtransGateway {
    /// Creates a gateway client from the payment configuration.
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            server_key: config.midtrans_server_key.clone(),
            snap_base_url: config.snap_base_url.trim_end_matches('/').to_string(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SnapTransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct SnapCustomerDetails<'a> {
    first_name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct SnapItemDetail<'a> {
    id: &'a str,
    price: i64,
    quantity: u32,
    name: String,
}

#[derive(Debug, Serialize)]
struct SnapCheckoutBody<'a> {
    transaction_details: SnapTransactionDetails<'a>,
    customer_details: SnapCustomerDetails<'a>,
    item_details: Vec<SnapItemDetail<'a>>,
}

#[derive(Debug, Deserialize)]
struct SnapCheckoutResponse {
    token: String,
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    transaction_status: String,
    #[serde(default)]
    fraud_status: Option<String>,
    gross_amount: String,
}

#[async_trait]
impl PaymentGateway for MidtransGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let amount = price_for(request.tier).unwrap_or(request.amount);
        let body = SnapCheckoutBody {
            transaction_details: SnapTransactionDetails {
                order_id: request.order_id.as_str(),
                gross_amount: amount,
            },
            customer_details: SnapCustomerDetails {
                first_name: &request.customer_name,
                email: &request.customer_email,
            },
            item_details: vec![SnapItemDetail {
                id: request.tier.as_str(),
                price: amount,
                quantity: 1,
                name: format!(
                    "FlexBit {} Subscription",
                    request.tier.display_name().to_uppercase()
                ),
            }],
        };

        let response = self
            .http_client
            .post(format!("{}/transactions", self.snap_base_url))
            .basic_auth(self.server_key.expose_secret(), Some(""))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Snap checkout rejected");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let session: SnapCheckoutResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(CheckoutSession {
            token: session.token,
            redirect_url: session.redirect_url,
        })
    }

    async fn fetch_status(&self, order_id: &OrderId) -> Result<GatewayStatus, GatewayError> {
        let response = self
            .http_client
            .get(format!("{}/{}/status", self.api_base_url, order_id.as_str()))
            .basic_auth(self.server_key.expose_secret(), Some(""))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(GatewayStatus {
            transaction_status: TransactionStatus::parse(&body.transaction_status),
            fraud_status: body.fraud_status.as_deref().map(FraudStatus::parse),
            gross_amount: body.gross_amount,
        })
    }
}
