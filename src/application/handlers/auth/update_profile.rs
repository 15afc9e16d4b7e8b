//! UpdateProfileHandler - Command handler for profile edits.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Command to update the caller's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub principal: User,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Handler for profile edits.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, DomainError> {
        if let Some(full_name) = &cmd.full_name {
            if full_name.trim().is_empty() {
                return Err(DomainError::validation("fullName", "Full name cannot be empty"));
            }
        }
        if let Some(phone) = &cmd.phone_number {
            if phone.trim().len() < 8 {
                return Err(DomainError::validation("phoneNumber", "Invalid phone number"));
            }
        }

        let mut user = cmd.principal;
        user.update_profile(cmd.full_name, cmd.phone_number, Timestamp::now());
        self.users.update(&user).await?;
        Ok(user)
    }
}
