//! Gateway payment notifications and their authentication.
//!
//! The signature check is the sole trust boundary of the webhook endpoint:
//! every business field in the body is untrusted until it passes, and even
//! then the transaction state is re-fetched from the gateway rather than
//! read from the notification.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Inbound payment notification.
///
/// Field names are a wire contract with the payment gateway and must not
/// be renamed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub order_id: String,
    pub status_code: String,
    pub gross_amount: String,
    pub signature_key: String,
    #[serde(default)]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub fraud_status: Option<String>,
}

/// Signature verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Notification signature mismatch")]
    Mismatch,
}

/// Verifies notification authenticity against the merchant server key.
pub struct NotificationVerifier {
    server_key: String,
}

impl NotificationVerifier {
    /// Creates a verifier for the given server key.
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
        }
    }

    /// Checks the notification's signature.
    ///
    /// Expected signature is
    /// `sha512(order_id ++ status_code ++ gross_amount ++ server_key)`
    /// hex-encoded, compared in constant time.
    pub fn verify(&self, notification: &PaymentNotification) -> Result<(), SignatureError> {
        let expected = compute_signature(
            &notification.order_id,
            &notification.status_code,
            &notification.gross_amount,
            &self.server_key,
        );

        if constant_time_eq(expected.as_bytes(), notification.signature_key.as_bytes()) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

/// Computes the hex-encoded SHA-512 signature for a notification.
pub fn compute_signature(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
) -> String {
    let mut hasher = Sha512::new();
    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
