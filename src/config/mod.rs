//! Configuration management
//!
//! TOML configuration with `${VAR}` environment substitution, `VANTAGE_*`
//! environment overrides, and validation.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_logging_config};
pub use schema::{
    ApplicationConfig, DatabaseConfig, DiagnosticsConfig, LoggingConfig, QueriesConfig,
    VantageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
