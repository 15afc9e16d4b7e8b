//! Reconciliation decision table.
//!
//! Maps an authoritative gateway status to the action to take on an order.
//! The webhook handler and the manual verification path both go through
//! this single table; neither forks its own copy.

use super::{FraudStatus, GatewayStatus, TransactionStatus};

/// What the reconciler should do with an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Settle the order and update the owner's subscription.
    ApplySuccess,
    /// Fail the order; subscription untouched.
    MarkFailed,
    /// Record a fraud-review hold; subscription untouched.
    HoldChallenge,
    /// Nothing to do (gateway still pending, or a status this
    /// application does not act on).
    NoOp,
}

/// Decides the action for a gateway status snapshot.
///
/// | transaction_status | fraud_status | action |
/// |--------------------|--------------|--------|
/// | capture | accept | ApplySuccess |
/// | capture | challenge | HoldChallenge |
/// | capture | other/none | NoOp |
/// | settlement | - | ApplySuccess |
/// | cancel, deny, expire | - | MarkFailed |
/// | anything else | - | NoOp |
pub fn decide(status: &GatewayStatus) -> ReconcileAction {
    match &status.transaction_status {
        TransactionStatus::Capture => match &status.fraud_status {
            Some(FraudStatus::Accept) => ReconcileAction::ApplySuccess,
            Some(FraudStatus::Challenge) => ReconcileAction::HoldChallenge,
            _ => ReconcileAction::NoOp,
        },
        TransactionStatus::Settlement => ReconcileAction::ApplySuccess,
        TransactionStatus::Cancel | TransactionStatus::Deny | TransactionStatus::Expire => {
            ReconcileAction::MarkFailed
        }
        TransactionStatus::Pending | TransactionStatus::Other => ReconcileAction::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(
        transaction_status: TransactionStatus,
        fraud_status: Option<FraudStatus>,
    ) -> GatewayStatus {
        GatewayStatus {
            transaction_status,
            fraud_status,
            gross_amount: "999000.00".to_string(),
        }
    }

    #[test]
    fn capture_accept_applies_success() {
        let s = status(TransactionStatus::Capture, Some(FraudStatus::Accept));
        assert_eq!(decide(&s), ReconcileAction::ApplySuccess);
    }

    #[test]
    fn capture_challenge_holds() {
        let s = status(TransactionStatus::Capture, Some(FraudStatus::Challenge));
        assert_eq!(decide(&s), ReconcileAction::HoldChallenge);
    }

    #[test]
    fn capture_without_fraud_verdict_is_noop() {
        let s = status(TransactionStatus::Capture, None);
        assert_eq!(decide(&s), ReconcileAction::NoOp);

        let s = status(TransactionStatus::Capture, Some(FraudStatus::Deny));
        assert_eq!(decide(&s), ReconcileAction::NoOp);
    }

    #[test]
    fn settlement_applies_success_regardless_of_fraud_field() {
        let s = status(TransactionStatus::Settlement, None);
        assert_eq!(decide(&s), ReconcileAction::ApplySuccess);

        let s = status(TransactionStatus::Settlement, Some(FraudStatus::Challenge));
        assert_eq!(decide(&s), ReconcileAction::ApplySuccess);
    }

    #[test]
    fn cancel_deny_expire_fail_the_order() {
        for ts in [
            TransactionStatus::Cancel,
            TransactionStatus::Deny,
            TransactionStatus::Expire,
        ] {
            let s = status(ts, None);
            assert_eq!(decide(&s), ReconcileAction::MarkFailed);
        }
    }

    #[test]
    fn pending_and_unknown_are_noops() {
        let s = status(TransactionStatus::Pending, None);
        assert_eq!(decide(&s), ReconcileAction::NoOp);

        let s = status(TransactionStatus::Other, None);
        assert_eq!(decide(&s), ReconcileAction::NoOp);
    }
}
