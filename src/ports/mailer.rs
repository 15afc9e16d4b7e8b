//! Mailer port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// An outbound email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Port for email delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message.
    ///
    /// # Errors
    ///
    /// - `EmailDeliveryError` when the provider rejects or is unreachable
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }
}
