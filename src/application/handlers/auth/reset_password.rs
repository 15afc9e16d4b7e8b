//! ResetPasswordHandler - Command handler completing a password reset.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{PasswordHasher, UserRepository};

use super::reset_token::hash_token;

/// Command carrying the emailed token and the new password.
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub new_password: String,
}

/// Handler completing a reset.
///
/// The token is matched by hash and must be unexpired; it is single-use.
pub struct ResetPasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ResetPasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), DomainError> {
        if cmd.new_password.len() < 8 {
            return Err(DomainError::validation(
                "newPassword",
                "Password must be at least 8 characters",
            ));
        }

        let token_hash = hash_token(&cmd.token);
        let now = Timestamp::now();

        let user = self.users.find_by_reset_token_hash(&token_hash).await?;
        let Some(mut user) = user.filter(|u| u.reset_token_matches(&token_hash, now)) else {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Reset token is invalid or has expired",
            ));
        };

        let new_hash = self.hasher.hash(&cmd.new_password)?;
        user.change_password(new_hash, now);
        user.clear_reset_token(now);
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::reset_token::generate_token;
    use crate::application::handlers::auth::test_support::FakeHasher;
    use crate::application::handlers::payment::test_support::InMemoryUserRepository;
    use crate::domain::user::User;
    use crate::ports::PasswordHasher as _;

    async fn user_with_token(
        users: &Arc<InMemoryUserRepository>,
        token: &str,
        expires_in_days: i64,
    ) -> User {
        let now = Timestamp::now();
        let mut user = User::register(
            "hadi@example.com",
            "+628123987654",
            FakeHasher.hash("old-password").unwrap(),
            "Hadi",
            now,
        );
        user.set_reset_token(hash_token(token), now.add_days(expires_in_days), now);
        users.save(&user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn valid_token_resets_password_and_clears_token() {
        let users = Arc::new(InMemoryUserRepository::new());
        let token = generate_token();
        let user = user_with_token(&users, &token, 1).await;

        let handler = ResetPasswordHandler::new(users.clone(), Arc::new(FakeHasher));
        handler
            .handle(ResetPasswordCommand {
                token: token.clone(),
                new_password: "brand-new-pass".to_string(),
            })
            .await
            .unwrap();

        let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
        assert!(FakeHasher.verify("brand-new-pass", &stored.password_hash).unwrap());
        assert!(stored.reset_token_hash.is_none());

        // Single use: the same token no longer works.
        let again = handler
            .handle(ResetPasswordCommand {
                token,
                new_password: "another-pass1".to_string(),
            })
            .await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let users = Arc::new(InMemoryUserRepository::new());
        let token = generate_token();
        user_with_token(&users, &token, -1).await;

        let handler = ResetPasswordHandler::new(users, Arc::new(FakeHasher));
        let result = handler
            .handle(ResetPasswordCommand {
                token,
                new_password: "brand-new-pass".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = ResetPasswordHandler::new(users, Arc::new(FakeHasher));
        let result = handler
            .handle(ResetPasswordCommand {
                token: generate_token(),
                new_password: "brand-new-pass".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
