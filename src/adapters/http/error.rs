//! HTTP error mapping.
//!
//! Every handler error funnels through [`ApiError`], which renders a JSON
//! body and maps the domain error code to a status. Nothing propagates as
//! a process-level fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Error wrapper implementing `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,

            ErrorCode::Forbidden | ErrorCode::FeatureLocked | ErrorCode::TierLimitReached => {
                StatusCode::FORBIDDEN
            }

            ErrorCode::UserNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::StockNotFound
            | ErrorCode::WatchlistEntryNotFound => StatusCode::NOT_FOUND,

            ErrorCode::DuplicateEntry => StatusCode::CONFLICT,

            ErrorCode::PaymentGatewayError => StatusCode::BAD_GATEWAY,

            ErrorCode::InvalidStateTransition
            | ErrorCode::EmailDeliveryError
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Request failed");
        } else {
            tracing::debug!(code = %self.0.code, message = %self.0.message, "Request rejected");
        }

        // Internal details stay in the logs; the payment gateway contract
        // wants a recognizable message for upstream failures.
        let message = match self.0.code {
            ErrorCode::PaymentGatewayError => "Payment gateway error".to_string(),
            ErrorCode::DatabaseError | ErrorCode::InternalError => "Server Error".to_string(),
            _ => self.0.message.clone(),
        };

        let body = ErrorResponse::new(self.0.code.to_string(), message);
        (status, Json(body)).into_response()
    }
}
