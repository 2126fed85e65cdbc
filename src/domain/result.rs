//! Result type alias for Vantage operations

use super::errors::VantageError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, VantageError>;
