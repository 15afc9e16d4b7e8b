//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Midtrans Snap)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Midtrans server key (SB-Mid-server-... or Mid-server-...)
    pub midtrans_server_key: SecretString,

    /// Base URL for the Snap API (checkout session creation)
    #[serde(default = "default_snap_base_url")]
    pub snap_base_url: String,

    /// Base URL for the core API (transaction status lookups)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    /// Check if using a Midtrans sandbox key
    pub fn is_sandbox(&self) -> bool {
        self.midtrans_server_key
            .expose_secret()
            .starts_with("SB-Mid-server-")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.midtrans_server_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("MIDTRANS_SERVER_KEY"));
        }
        if !key.starts_with("SB-Mid-server-") && !key.starts_with("Mid-server-") {
            return Err(ValidationError::InvalidMidtransServerKey);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            midtrans_server_key: SecretString::new(String::new()),
            snap_base_url: default_snap_base_url(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_snap_base_url() -> String {
    "https://app.sandbox.midtrans.com/snap/v1".to_string()
}

fn default_api_base_url() -> String {
    "https://api.sandbox.midtrans.com/v2".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> PaymentConfig {
        PaymentConfig {
            midtrans_server_key: SecretString::new(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_sandbox() {
        assert!(config_with_key("SB-Mid-server-xxx").is_sandbox());
        assert!(!config_with_key("Mid-server-xxx").is_sandbox());
    }

    #[test]
    fn test_validation_missing_key() {
        let config = PaymentConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        let config = config_with_key("sk_test_xxx");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config_with_key("SB-Mid-server-abc123").validate().is_ok());
        assert!(config_with_key("Mid-server-abc123").validate().is_ok());
    }

    #[test]
    fn test_default_base_urls_point_at_sandbox() {
        let config = PaymentConfig::default();
        assert!(config.snap_base_url.contains("sandbox"));
        assert!(config.api_base_url.contains("sandbox"));
    }
}
