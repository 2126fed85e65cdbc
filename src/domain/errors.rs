//! Domain error types
//!
//! This module defines the error hierarchy for Vantage. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Vantage error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VantageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Query service errors
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Query service errors
///
/// Errors surfaced by `QueryService` implementations. The orchestrator
/// treats the two kinds very differently: backend failures are caught and
/// converted into a generic user-facing message, while configuration
/// errors indicate a deployment defect and propagate as fatal.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Backend failure of any kind (connection, SQL execution, decoding)
    #[error("Backend query failed: {0}")]
    Backend(String),

    /// Deployment defect: unknown data source, missing or empty template
    #[error("Query configuration error: {0}")]
    Configuration(String),
}

impl QueryError {
    /// Whether this is a recoverable backend failure
    ///
    /// Backend failures return the session to the initial stage with a
    /// generic message; everything else is fatal.
    pub fn is_backend(&self) -> bool {
        matches!(self, QueryError::Backend(_))
    }

    /// Short kind label used in diagnostic records
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Backend(_) => "backend",
            QueryError::Configuration(_) => "configuration",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VantageError {
    fn from(err: std::io::Error) -> Self {
        VantageError::Io(err.to_string())
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for VantageError {
    fn from(err: csv::Error) -> Self {
        VantageError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VantageError {
    fn from(err: toml::de::Error) -> Self {
        VantageError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vantage_error_display() {
        let err = VantageError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_query_error_conversion() {
        let query_err = QueryError::Backend("connection refused".to_string());
        let err: VantageError = query_err.into();
        assert!(matches!(err, VantageError::Query(_)));
    }

    #[test]
    fn test_query_error_kinds() {
        assert!(QueryError::Backend("x".into()).is_backend());
        assert!(!QueryError::Configuration("x".into()).is_backend());
        assert_eq!(QueryError::Backend("x".into()).kind(), "backend");
        assert_eq!(
            QueryError::Configuration("x".into()).kind(),
            "configuration"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: VantageError = io_err.into();
        assert!(matches!(err, VantageError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: VantageError = toml_err.into();
        assert!(matches!(err, VantageError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_vantage_error_implements_std_error() {
        let err = VantageError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
