//! Stock import job configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the daily stock import from the relational source.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Whether the scheduled import runs at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// MySQL connection URL of the analytics source database
    #[serde(default)]
    pub source_url: String,

    /// Local hour of day (0-23) at which the daily import fires
    #[serde(default = "default_run_hour")]
    pub run_hour: u8,

    /// Offset from UTC in minutes for the scheduler clock (default WIB, UTC+7)
    #[serde(default = "default_utc_offset_mins")]
    pub utc_offset_mins: i32,
}

impl ImportConfig {
    /// Validate import configuration
    ///
    /// The source URL is only required when the job is enabled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.run_hour > 23 {
            return Err(ValidationError::InvalidImportHour);
        }
        if self.enabled {
            if self.source_url.is_empty() {
                return Err(ValidationError::MissingRequired("IMPORT_SOURCE_URL"));
            }
            if !self.source_url.starts_with("mysql://") {
                return Err(ValidationError::InvalidSourceDatabaseUrl);
            }
        }
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            source_url: String::new(),
            run_hour: default_run_hour(),
            utc_offset_mins: default_utc_offset_mins(),
        }
    }
}

fn default_enabled() -> bool {
    false
}

fn default_run_hour() -> u8 {
    19
}

fn default_utc_offset_mins() -> i32 {
    7 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_import_needs_no_url() {
        let config = ImportConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_import_requires_url() {
        let config = ImportConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_import_rejects_wrong_scheme() {
        let config = ImportConfig {
            enabled: true,
            source_url: "postgres://localhost/source".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_hour_bounds() {
        let config = ImportConfig {
            run_hour: 24,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_enabled_config() {
        let config = ImportConfig {
            enabled: true,
            source_url: "mysql://root@localhost/flexbit".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
