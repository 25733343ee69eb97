//! Configuration management for Vitalex.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Vitalex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! The document-store connection target is a single value that can be
//! supplied entirely from the environment (`VITALEX_STORE_URL`), either
//! via `${VITALEX_STORE_URL}` substitution in the file or as a direct
//! override.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! base_url = "${VITALEX_STORE_URL}"
//! page_size = 100
//!
//! [export]
//! output_dir = "exports"
//! birth_filename = "birth-events.csv"
//! death_filename = "death-events.csv"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vitalex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vitalex.toml")?;
//! println!("Store URL: {}", config.store.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExportConfig, LoggingConfig, RetryConfig, StoreConfig, UserApiConfig,
    VitalexConfig,
};
