//! ChangePasswordHandler - Command handler for password changes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, UserRepository};

/// Command to change the caller's password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub principal: User,
    pub current_password: String,
    pub new_password: String,
}

/// Handler for password changes. Requires the current password.
pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), DomainError> {
        if cmd.new_password.len() < 8 {
            return Err(DomainError::validation(
                "newPassword",
                "Password must be at least 8 characters",
            ));
        }

        if !self
            .hasher
            .verify(&cmd.current_password, &cmd.principal.password_hash)?
        {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Current password is incorrect",
            ));
        }

        let mut user = cmd.principal;
        let new_hash = self.hasher.hash(&cmd.new_password)?;
        user.change_password(new_hash, Timestamp::now());
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::FakeHasher;
    use crate::application::handlers::payment::test_support::InMemoryUserRepository;
    use crate::ports::PasswordHasher as _;

    fn user_with_password(password: &str) -> User {
        User::register(
            "fajar@example.com",
            "+628555000111",
            FakeHasher.hash(password).unwrap(),
            "Fajar",
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn correct_current_password_changes_hash() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = user_with_password("old-password");
        users.save(&user).await.unwrap();

        let handler = ChangePasswordHandler::new(users.clone(), Arc::new(FakeHasher));
        handler
            .handle(ChangePasswordCommand {
                principal: user.clone(),
                current_password: "old-password".to_string(),
                new_password: "new-password".to_string(),
            })
            .await
            .unwrap();

        let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
        assert!(FakeHasher.verify("new-password", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn wrong_current_password_is_rejected() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = user_with_password("old-password");
        users.save(&user).await.unwrap();

        let handler = ChangePasswordHandler::new(users, Arc::new(FakeHasher));
        let result = handler
            .handle(ChangePasswordCommand {
                principal: user,
                current_password: "guess".to_string(),
                new_password: "new-password".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
