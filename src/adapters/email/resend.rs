//! Resend implementation of the Mailer port.

use async_trait::async_trait;

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EmailMessage, Mailer};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Mailer sending through the Resend HTTP API.
pub struct ResendMailer {
    api_key: String,
    from: String,
    http_client: reqwest::Client,
}

impl ResendMailer {
    /// Creates a mailer from the email configuration.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            api_key: config.resend_api_key.clone(),
            from: config.from_header(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html_body,
        });

        let response = self
            .http_client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::EmailDeliveryError,
                    format!("Email provider unreachable: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Email provider rejected message");
            return Err(DomainError::new(
                ErrorCode::EmailDeliveryError,
                format!("Email provider rejected message ({})", status),
            )
            .with_detail("response", detail));
        }

        Ok(())
    }
}
