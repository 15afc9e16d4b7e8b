//! Payment handlers.
//!
//! ## Commands
//! - Creating orders (checkout session + pending row)
//! - Processing gateway webhook notifications
//! - Manual order verification (non-production fallback)
//!
//! ## Queries
//! - Payment history
//!
//! Both notification processing and manual verification delegate their
//! state transitions to [`ReconcileOrderHandler`].

mod create_order;
mod payment_history;
mod process_notification;
mod reconcile_order;
mod verify_order;

#[cfg(test)]
pub(crate) mod test_support;

// Commands
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use process_notification::{
    ProcessNotificationCommand, ProcessNotificationHandler, ProcessNotificationResult,
};
pub use reconcile_order::{ReconcileOrderHandler, ReconcileOutcome};
pub use verify_order::{
    VerificationStatus, VerifyOrderCommand, VerifyOrderHandler, VerifyOrderResult,
};

// Queries
pub use payment_history::{PaymentHistoryHandler, PaymentHistoryQuery, PaymentHistoryResult};
