//! Authoritative transaction state as reported by the payment gateway.
//!
//! Webhook bodies carry these fields too, but they are never trusted; the
//! reconciler always re-fetches this data from the gateway by order id.

use serde::{Deserialize, Serialize};

/// Gateway transaction status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Card payment captured; final outcome depends on fraud review.
    Capture,
    /// Funds settled.
    Settlement,
    /// Awaiting customer action.
    Pending,
    /// Cancelled by merchant or customer.
    Cancel,
    /// Rejected by the gateway.
    Deny,
    /// Checkout session lapsed.
    Expire,
    /// Any status this application does not act on.
    #[serde(other)]
    Other,
}

impl TransactionStatus {
    /// Maps the gateway's wire string.
    pub fn parse(s: &str) -> Self {
        match s {
            "capture" => TransactionStatus::Capture,
            "settlement" => TransactionStatus::Settlement,
            "pending" => TransactionStatus::Pending,
            "cancel" => TransactionStatus::Cancel,
            "deny" => TransactionStatus::Deny,
            "expire" => TransactionStatus::Expire,
            _ => TransactionStatus::Other,
        }
    }
}

/// Gateway fraud review outcome, present on card captures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudStatus {
    Accept,
    Challenge,
    Deny,
    #[serde(other)]
    Other,
}

impl FraudStatus {
    /// Maps the gateway's wire string.
    pub fn parse(s: &str) -> Self {
        match s {
            "accept" => FraudStatus::Accept,
            "challenge" => FraudStatus::Challenge,
            "deny" => FraudStatus::Deny,
            _ => FraudStatus::Other,
        }
    }
}

/// Snapshot of a transaction fetched from the gateway status API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    /// Transaction lifecycle status.
    pub transaction_status: TransactionStatus,

    /// Fraud review outcome, when applicable.
    pub fraud_status: Option<FraudStatus>,

    /// Gross amount as reported by the gateway, e.g. `"999000.00"`.
    pub gross_amount: String,
}

impl GatewayStatus {
    /// Parses the gross amount into whole rupiah.
    ///
    /// The gateway formats amounts with a decimal fraction that is always
    /// zero for IDR. Anything with a non-zero fraction, or that is not a
    /// number, yields `None`.
    pub fn amount(&self) -> Option<i64> {
        parse_gross_amount(&self.gross_amount)
    }
}

/// Parses a gateway amount string (`"5000"`, `"599000.00"`) to whole rupiah.
pub fn parse_gross_amount(s: &str) -> Option<i64> {
    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (s, None),
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
            return None;
        }
    }

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    whole.parse::<i64>().ok()
}
