//! HTTP handlers for payment endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    CreateOrderCommand, PaymentHistoryQuery, ProcessNotificationCommand, VerifyOrderCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::PaymentNotification;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CreateOrderRequest, CreateOrderResponse, OrderResponse, VerifyOrderRequest,
    VerifyOrderResponse,
};

/// POST /api/payment/transaction - open a checkout session
pub async fn create_transaction(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_order_handler()
        .handle(CreateOrderCommand {
            principal,
            tier: body.tier,
        })
        .await?;

    Ok(Json(CreateOrderResponse::from(result)))
}

/// POST /api/payment/notification - gateway webhook
///
/// Answers a bare `200 OK` once the notification has been authenticated
/// and reconciled, whatever the business outcome, so the gateway doesn't
/// retry-storm. Signature mismatches are 403, malformed order ids 400,
/// and genuine handler failures 500 (which the gateway will retry).
pub async fn handle_notification(
    State(state): State<AppState>,
    Json(notification): Json<PaymentNotification>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .process_notification_handler()
        .handle(ProcessNotificationCommand { notification })
        .await?;

    Ok((StatusCode::OK, "OK"))
}

/// POST /api/payment/verify - manual verification (non-production only)
pub async fn verify_transaction(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<VerifyOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if state.is_production() {
        return Err(ApiError(DomainError::new(
            ErrorCode::Forbidden,
            "Manual verification not available in production",
        )));
    }

    let result = state
        .verify_order_handler()
        .handle(VerifyOrderCommand {
            principal,
            order_id: body.order_id,
        })
        .await?;

    Ok(Json(VerifyOrderResponse::from(result)))
}

/// GET /api/payment/history - caller's orders, newest first
pub async fn get_payment_history(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .payment_history_handler()
        .handle(PaymentHistoryQuery {
            user_id: principal.id,
        })
        .await?;

    let response: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(Json(response))
}
