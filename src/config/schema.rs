//! Configuration schema types
//!
//! This module defines the configuration structure for Vitalex.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Main Vitalex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct VitalexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Document store configuration
    pub store: StoreConfig,

    /// Export output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// User-directory API configuration (assignment collaborator only)
    #[serde(default)]
    pub users: Option<UserApiConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VitalexConfig {
    /// Loads and validates configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::domain::Result<Self> {
        crate::config::loader::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.export.validate()?;
        if let Some(ref users) = self.users {
            users.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for store requests
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Document store configuration
///
/// The connection target is a single base url; it is typically supplied
/// through the environment as `${VITALEX_STORE_URL}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store
    pub base_url: String,

    /// Bearer token for store requests (optional)
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Username for basic authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication (optional)
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size for the event cursor
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("store.base_url cannot be empty".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("store.base_url is not a valid url: {e}"))?;

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("store.base_url must start with http:// or https://".to_string());
        }

        if self.page_size == 0 {
            return Err("store.page_size must be greater than zero".to_string());
        }

        if self.username.is_some() {
            let empty = self
                .password
                .as_ref()
                .map(|p| p.expose_secret().is_empty())
                .unwrap_or(true);
            if empty {
                return Err(
                    "store.password cannot be empty when store.username is set".to_string()
                );
            }
        }

        Ok(())
    }
}

/// Export output settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Birth export file name
    #[serde(default = "default_birth_filename")]
    pub birth_filename: String,

    /// Death export file name
    #[serde(default = "default_death_filename")]
    pub death_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            birth_filename: default_birth_filename(),
            death_filename: default_death_filename(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.birth_filename.is_empty() || self.death_filename.is_empty() {
            return Err("export file names cannot be empty".to_string());
        }
        if self.birth_filename == self.death_filename {
            return Err("export.birth_filename and export.death_filename must differ".to_string());
        }
        Ok(())
    }

    /// Full path of the birth export file
    pub fn birth_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output_dir).join(&self.birth_filename)
    }

    /// Full path of the death export file
    pub fn death_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output_dir).join(&self.death_filename)
    }
}

/// User-directory API configuration
///
/// Only consumed by the assignment collaborator, never by the export
/// pipeline itself.
#[derive(Debug, Clone, Deserialize)]
pub struct UserApiConfig {
    /// Base URL of the user-lookup API
    pub base_url: String,

    /// Bearer token for user-lookup calls
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl UserApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("users.base_url cannot be empty".to_string());
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("users.base_url is not a valid url: {e}"))?;
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log file directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".into());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u64 {
    100
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_birth_filename() -> String {
    "birth-events.csv".to_string()
}

fn default_death_filename() -> String {
    "death-events.csv".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> VitalexConfig {
        toml::from_str(
            r#"
            [store]
            base_url = "http://localhost:3447/fhir"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config = minimal_config();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.store.page_size, 100);
        assert_eq!(config.store.timeout_seconds, 30);
        assert_eq!(config.export.birth_filename, "birth-events.csv");
        assert_eq!(config.export.death_filename, "death-events.csv");
        assert!(config.users.is_none());
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_minimal_config_validates() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = minimal_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = minimal_config();
        config.store.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = minimal_config();
        config.store.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = minimal_config();
        config.store.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_output_filenames_rejected() {
        let mut config = minimal_config();
        config.export.birth_filename = "events.csv".to_string();
        config.export.death_filename = "events.csv".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_username_without_password_rejected() {
        let mut config = minimal_config();
        config.store.username = Some("exporter".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_paths() {
        let export = ExportConfig {
            output_dir: "/var/out".to_string(),
            ..ExportConfig::default()
        };
        assert_eq!(
            export.birth_path(),
            std::path::PathBuf::from("/var/out/birth-events.csv")
        );
        assert_eq!(
            export.death_path(),
            std::path::PathBuf::from("/var/out/death-events.csv")
        );
    }

    #[test]
    fn test_retry_defaults() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.initial_delay_ms, 500);
        assert_eq!(retry.max_delay_ms, 10_000);
        assert!((retry.backoff_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut config = minimal_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
