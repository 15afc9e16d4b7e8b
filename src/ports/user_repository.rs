//! User repository port.
//!
//! Implementations must enforce the unique email and phone number
//! constraints and surface violations as `DuplicateEntry`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// - `DuplicateEntry` if the email or phone number is taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user (profile, credentials, subscription).
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by email. Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user matching either the email or the phone number.
    ///
    /// Used by registration to report conflicts before inserting.
    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by the hash of an outstanding password reset token.
    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError>;

    /// All users, newest first. Admin listing.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Delete a user. Orders and watchlist entries cascade.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
