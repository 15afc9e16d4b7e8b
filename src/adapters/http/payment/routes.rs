//! Router for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    create_transaction, get_payment_history, handle_notification, verify_transaction,
};

/// Payment API routes.
///
/// - `POST /transaction` - open a checkout session (auth)
/// - `POST /verify` - manual verification, disabled in production (auth)
/// - `POST /notification` - gateway webhook (public; signature-verified)
/// - `GET /history` - caller's orders (auth)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/transaction", post(create_transaction))
        .route("/verify", post(verify_transaction))
        .route("/notification", post(handle_notification))
        .route("/history", get(get_payment_history))
}
