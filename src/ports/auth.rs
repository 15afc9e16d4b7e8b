//! Authentication ports - password hashing and token issuance.
//!
//! Handlers depend on these contracts, never on a concrete algorithm, so
//! tests can swap in deterministic fakes.

use thiserror::Error;

use crate::domain::foundation::{DomainError, UserId};

/// Port for password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Token validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Port for bearer token issuance and validation.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for a user.
    fn issue(&self, user_id: &UserId) -> Result<String, DomainError>;

    /// Validate a token and return the subject user id.
    fn validate(&self, token: &str) -> Result<UserId, AuthError>;
}
