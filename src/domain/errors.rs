//! Domain error types
//!
//! This module defines the error hierarchy for anonbench. Caller mistakes
//! (bad sizes, unknown methods) are distinct variants so the CLI can name the
//! offending value; everything else is carried as a message.

use thiserror::Error;

/// Main anonbench error type
///
/// This is the primary error type used throughout the library. Neither of
/// the request errors is retryable: both indicate a configuration bug.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A dataset size below zero was requested
    #[error("Invalid dataset size: {size} (must be non-negative)")]
    InvalidSize { size: i64 },

    /// The method name is not one of the registered strategies
    #[error(
        "Unknown anonymization method: '{0}' (expected one of deterministic, shuffle, bitwise)"
    )]
    UnknownMethod(String),

    /// De-anonymization was requested from a one-way method
    #[error("Anonymization method '{0}' is not reversible")]
    Irreversible(String),

    /// Restored data did not match the generated dataset
    #[error("Round-trip verification failed for method '{method}' at size {size}")]
    RoundTripMismatch { method: String, size: usize },

    /// The run was stopped by a shutdown signal
    #[error("Benchmark interrupted after {completed} measurement(s)")]
    Interrupted { completed: usize },

    /// Dataset shape violations
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl BenchError {
    /// Whether the error comes from a malformed benchmark request
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            BenchError::InvalidSize { .. } | BenchError::UnknownMethod(_)
        )
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_size_names_the_size() {
        let err = BenchError::InvalidSize { size: -7 };
        assert_eq!(
            err.to_string(),
            "Invalid dataset size: -7 (must be non-negative)"
        );
    }

    #[test]
    fn test_unknown_method_names_the_method() {
        let err = BenchError::UnknownMethod("rot13".to_string());
        assert!(err.to_string().contains("'rot13'"));
    }

    #[test]
    fn test_request_error_classification() {
        assert!(BenchError::InvalidSize { size: -1 }.is_request_error());
        assert!(BenchError::UnknownMethod("x".to_string()).is_request_error());
        assert!(!BenchError::Interrupted { completed: 2 }.is_request_error());
        assert!(!BenchError::Configuration("bad".to_string()).is_request_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: BenchError = io_err.into();
        assert!(matches!(err, BenchError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: BenchError = json_err.into();
        assert!(matches!(err, BenchError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BenchError = toml_err.into();
        assert!(matches!(err, BenchError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_bench_error_implements_std_error() {
        let err = BenchError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
