//! Payment domain - orders, gateway status, webhook authentication and the
//! reconciliation decision table.

mod gateway_status;
mod notification;
mod order;
mod order_id;
mod reconciler;

pub use gateway_status::{parse_gross_amount, FraudStatus, GatewayStatus, TransactionStatus};
pub use notification::{
    compute_signature, NotificationVerifier, PaymentNotification, SignatureError,
};
pub use order::{Order, OrderStatus};
pub use order_id::OrderId;
pub use reconciler::{decide, ReconcileAction};
