//! RequestPasswordResetHandler - Command handler for "forgot password".

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{EmailMessage, Mailer, UserRepository};

use super::reset_token::{generate_token, hash_token};

/// Command to start a password reset.
#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
    pub email: String,
}

/// Handler for reset requests.
///
/// Always reports success to the caller; whether the email exists is not
/// disclosed. When it does exist, a hashed token with a short expiry is
/// stored and a reset link is mailed.
pub struct RequestPasswordResetHandler {
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    client_url: String,
    token_ttl: Duration,
}

impl RequestPasswordResetHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn Mailer>,
        client_url: impl Into<String>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            mailer,
            client_url: client_url.into(),
            token_ttl,
        }
    }

    pub async fn handle(&self, cmd: RequestPasswordResetCommand) -> Result<(), DomainError> {
        let email = cmd.email.trim().to_lowercase();
        let Some(mut user) = self.users.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_token();
        let now = Timestamp::now();
        let ttl_mins = (self.token_ttl.as_secs() / 60).max(1);
        let expires = Timestamp::from_datetime(
            *now.as_datetime() + chrono::Duration::seconds(self.token_ttl.as_secs() as i64),
        );

        user.set_reset_token(hash_token(&token), expires, now);
        self.users.update(&user).await?;

        let reset_url = format!("{}/reset-password?token={}", self.client_url, token);
        let message = EmailMessage {
            to: user.email.clone(),
            subject: "Reset your FlexBit password".to_string(),
            html_body: format!(
                "<p>Hi {},</p>\
                 <p>Someone requested a password reset for your account. \
                 The link below is valid for {} minutes.</p>\
                 <p><a href=\"{}\">Reset password</a></p>\
                 <p>If this wasn't you, you can ignore this email.</p>",
                user.full_name, ttl_mins, reset_url
            ),
        };

        if let Err(e) = self.mailer.send(message).await {
            // The token is already stored; a delivery hiccup shouldn't
            // leak account existence through a 5xx either.
            tracing::error!(user_id = %user.id, error = %e, "Reset email delivery failed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::RecordingMailer;
    use crate::application::handlers::payment::test_support::InMemoryUserRepository;
    use crate::domain::user::User;

    fn handler(
        users: Arc<InMemoryUserRepository>,
        mailer: Arc<RecordingMailer>,
    ) -> RequestPasswordResetHandler {
        RequestPasswordResetHandler::new(
            users,
            mailer,
            "http://localhost:3000",
            Duration::from_secs(300),
        )
    }

    #[tokio::test]
    async fn known_email_stores_hashed_token_and_sends_link() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::new());
        let user = User::register(
            "gita@example.com",
            "+628800112233",
            "hash",
            "Gita",
            Timestamp::now(),
        );
        users.save(&user).await.unwrap();

        handler(users.clone(), mailer.clone())
            .handle(RequestPasswordResetCommand {
                email: "gita@example.com".to_string(),
            })
            .await
            .unwrap();

        let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
        let token_hash = stored.reset_token_hash.expect("token stored");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "gita@example.com");

        // The mailed link carries the raw token; storage has only the hash.
        let link_token = sent[0]
            .html_body
            .split("token=")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        assert_eq!(hash_token(link_token), token_hash);
        assert!(!sent[0].html_body.contains(&token_hash));
    }

    #[tokio::test]
    async fn unknown_email_succeeds_without_sending() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::new());

        handler(users, mailer.clone())
            .handle(RequestPasswordResetCommand {
                email: "ghost@example.com".to_string(),
            })
            .await
            .unwrap();

        assert!(mailer.sent().is_empty());
    }
}
