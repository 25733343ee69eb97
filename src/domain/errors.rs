//! Domain error types
//!
//! This module defines the error hierarchy for Vitalex. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Vitalex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VitalexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Record resolution errors (building one aggregate from the graph)
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Document-store-specific errors
///
/// Errors that occur when talking to the document store. These errors
/// don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Invalid response from the store
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// A document failed boundary validation
    #[error("Invalid {collection} document: {message}")]
    InvalidDocument { collection: String, message: String },

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for VitalexError {
    fn from(err: std::io::Error) -> Self {
        VitalexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VitalexError {
    fn from(err: serde_json::Error) -> Self {
        VitalexError::Serialization(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for VitalexError {
    fn from(err: csv::Error) -> Self {
        VitalexError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VitalexError {
    fn from(err: toml::de::Error) -> Self {
        VitalexError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitalex_error_display() {
        let err = VitalexError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::ConnectionFailed("Network error".to_string());
        let err: VitalexError = store_err.into();
        assert!(matches!(err, VitalexError::Store(_)));
    }

    #[test]
    fn test_invalid_document_display() {
        let err = StoreError::InvalidDocument {
            collection: "Patient".to_string(),
            message: "missing field `id`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid Patient document: missing field `id`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: VitalexError = io_err.into();
        assert!(matches!(err, VitalexError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: VitalexError = json_err.into();
        assert!(matches!(err, VitalexError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: VitalexError = toml_err.into();
        assert!(matches!(err, VitalexError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = VitalexError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;

        let err = StoreError::QueryFailed("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
