//! RegisterUserHandler - Command handler for account creation.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, TokenService, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: User,
    pub token: String,
}

/// Handler for account registration.
///
/// New accounts start on the free tier with an active subscription.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl RegisterUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<RegisterUserResult, DomainError> {
        validate(&cmd)?;

        if self
            .users
            .find_by_email_or_phone(&cmd.email, &cmd.phone_number)
            .await?
            .is_some()
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateEntry,
                "User with this email or phone number already exists",
            ));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;
        let user = User::register(
            cmd.email.trim().to_lowercase(),
            cmd.phone_number.trim(),
            password_hash,
            cmd.full_name.trim(),
            Timestamp::now(),
        );

        self.users.save(&user).await?;
        let token = self.tokens.issue(&user.id)?;

        tracing::info!(user_id = %user.id, "Account registered");
        Ok(RegisterUserResult { user, token })
    }
}

fn validate(cmd: &RegisterUserCommand) -> Result<(), DomainError> {
    if cmd.full_name.trim().is_empty() {
        return Err(DomainError::validation("fullName", "Full name is required"));
    }
    if !cmd.email.contains('@') {
        return Err(DomainError::validation("email", "Invalid email address"));
    }
    if cmd.phone_number.trim().len() < 8 {
        return Err(DomainError::validation("phoneNumber", "Invalid phone number"));
    }
    if cmd.password.len() < 8 {
        return Err(DomainError::validation(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::{FakeHasher, FakeTokens};
    use crate::application::handlers::payment::test_support::InMemoryUserRepository;
    use crate::domain::subscription::{SubscriptionStatus, UserTier};

    fn handler(users: Arc<InMemoryUserRepository>) -> RegisterUserHandler {
        RegisterUserHandler::new(users, Arc::new(FakeHasher), Arc::new(FakeTokens))
    }

    fn valid_command() -> RegisterUserCommand {
        RegisterUserCommand {
            full_name: "Rina Kurnia".to_string(),
            email: "rina@example.com".to_string(),
            phone_number: "+628777777777".to_string(),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn registration_creates_free_active_account() {
        let users = Arc::new(InMemoryUserRepository::new());
        let result = handler(users).handle(valid_command()).await.unwrap();

        assert_eq!(result.user.subscription.tier, UserTier::Free);
        assert_eq!(result.user.subscription.status, SubscriptionStatus::Active);
        assert!(!result.token.is_empty());
        assert_ne!(result.user.password_hash, "correct-horse");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = Arc::new(InMemoryUserRepository::new());
        let h = handler(users);
        h.handle(valid_command()).await.unwrap();

        let mut second = valid_command();
        second.phone_number = "+628999999999".to_string();
        let err = h.handle(second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEntry);
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected() {
        let users = Arc::new(InMemoryUserRepository::new());
        let h = handler(users);
        h.handle(valid_command()).await.unwrap();

        let mut second = valid_command();
        second.email = "other@example.com".to_string();
        let err = h.handle(second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEntry);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut cmd = valid_command();
        cmd.password = "short".to_string();
        assert!(handler(users).handle(cmd).await.is_err());
    }

    #[tokio::test]
    async fn email_is_normalized_to_lowercase() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut cmd = valid_command();
        cmd.email = "Rina@Example.COM".to_string();
        let result = handler(users).handle(cmd).await.unwrap();
        assert_eq!(result.user.email, "rina@example.com");
    }
}
