//! ProcessNotificationHandler - Command handler for inbound payment
//! webhooks.
//!
//! Order of operations is fixed: authenticate the notification, then
//! re-fetch ground truth from the gateway, then reconcile. The webhook
//! body's own status fields are never acted on.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::{NotificationVerifier, OrderId, PaymentNotification};
use crate::ports::PaymentGateway;

use super::reconcile_order::{ReconcileOrderHandler, ReconcileOutcome};

/// Command carrying a raw gateway notification.
#[derive(Debug, Clone)]
pub struct ProcessNotificationCommand {
    pub notification: PaymentNotification,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessNotificationResult {
    /// Notification authenticated and reconciled.
    Processed(ReconcileOutcome),
    /// Notification authenticated but referenced an order this system
    /// doesn't know. Logged and acknowledged so the gateway stops
    /// retrying a request that cannot ever succeed differently.
    UnknownOrder,
}

/// Handler for gateway webhook notifications.
pub struct ProcessNotificationHandler {
    verifier: NotificationVerifier,
    gateway: Arc<dyn PaymentGateway>,
    reconciler: ReconcileOrderHandler,
}

impl ProcessNotificationHandler {
    pub fn new(
        verifier: NotificationVerifier,
        gateway: Arc<dyn PaymentGateway>,
        reconciler: ReconcileOrderHandler,
    ) -> Self {
        Self {
            verifier,
            gateway,
            reconciler,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessNotificationCommand,
    ) -> Result<ProcessNotificationResult, DomainError> {
        let notification = &cmd.notification;

        // 1. Authenticate. Until this passes nothing in the body is trusted.
        self.verifier.verify(notification).map_err(|_| {
            tracing::warn!(order_id = %notification.order_id, "Invalid notification signature");
            DomainError::new(ErrorCode::Forbidden, "Invalid signature")
        })?;

        // 2. Validate the order id shape.
        let order_id = OrderId::parse(&notification.order_id)
            .map_err(|e| DomainError::validation("order_id", e.to_string()))?;

        // 3. Ground truth from the gateway, not from the webhook body.
        let status = self.gateway.fetch_status(&order_id).await.map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Status re-fetch failed");
            DomainError::from(e)
        })?;

        tracing::info!(
            order_id = %order_id,
            transaction_status = ?status.transaction_status,
            fraud_status = ?status.fraud_status,
            "Payment notification received"
        );

        // 4. Reconcile. An unknown order is an inconsistency to record,
        //    not a reason to make the gateway retry forever.
        match self.reconciler.apply(&order_id, &status).await {
            Ok(outcome) => Ok(ProcessNotificationResult::Processed(outcome)),
            Err(e) if e.code == ErrorCode::OrderNotFound => {
                tracing::warn!(order_id = %order_id, "Notification for unknown order acknowledged");
                Ok(ProcessNotificationResult::UnknownOrder)
            }
            Err(e) => Err(e),
        }
    }
}
