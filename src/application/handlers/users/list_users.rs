//! ListUsersHandler - Admin query for all accounts.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Handler for the admin user listing, newest first.
///
/// Admin gating happens at the HTTP layer; the handler itself is
/// policy-free. Password hashes are stripped by the response DTO.
pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self) -> Result<Vec<User>, DomainError> {
        self.users.list_all().await
    }
}
