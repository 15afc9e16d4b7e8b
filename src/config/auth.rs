//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (JWT bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign and verify JWTs
    pub jwt_secret: SecretString,

    /// Token lifetime in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: u64,

    /// Password reset token lifetime in minutes
    #[serde(default = "default_reset_token_ttl_mins")]
    pub reset_token_ttl_mins: u64,
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_days * 24 * 60 * 60)
    }

    /// Get reset token lifetime as Duration
    pub fn reset_token_ttl(&self) -> Duration {
        Duration::from_secs(self.reset_token_ttl_mins * 60)
    }

    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least 32 characters.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            token_ttl_days: default_token_ttl_days(),
            reset_token_ttl_mins: default_reset_token_ttl_mins(),
        }
    }
}

fn default_token_ttl_days() -> u64 {
    30
}

fn default_reset_token_ttl_mins() -> u64 {
    5
}
