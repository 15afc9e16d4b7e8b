//! Deterministic auth doubles for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{AuthError, EmailMessage, Mailer, PasswordHasher, TokenService};

/// Reversible "hash" so tests can assert without real key derivation.
pub struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed::{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed::{}", password))
    }
}

/// Token service that encodes the user id verbatim.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue(&self, user_id: &UserId) -> Result<String, DomainError> {
        Ok(format!("token::{}", user_id))
    }

    fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        token
            .strip_prefix("token::")
            .and_then(|id| UserId::parse(id).ok())
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mailer that records instead of sending.
pub struct RecordingMailer {
    messages: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }
}
