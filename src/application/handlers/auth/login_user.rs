//! LoginUserHandler - Command handler for credential authentication.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, TokenService, UserRepository};

/// Command to authenticate with email and password.
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginUserResult {
    pub user: User,
    pub token: String,
}

/// Handler for logins.
///
/// Unknown email and wrong password produce the same error, so the
/// endpoint doesn't confirm which emails have accounts.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUserHandler {
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

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<LoginUserResult, DomainError> {
        let email = cmd.email.trim().to_lowercase();
        let user = self.users.find_by_email(&email).await?;

        let Some(user) = user else {
            return Err(invalid_credentials());
        };

        if !self.hasher.verify(&cmd.password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&user.id)?;
        tracing::debug!(user_id = %user.id, "Login");
        Ok(LoginUserResult { user, token })
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::Unauthorized, "Invalid email or password")
}
