//! Configuration schema types
//!
//! This module defines the configuration structure for Vantage, mapped
//! from the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main Vantage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VantageConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Database connection settings
    pub database: DatabaseConfig,

    /// Query template settings
    pub queries: QueriesConfig,

    /// Diagnostics settings
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VantageConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.database.validate()?;
        self.queries.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
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

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,

    /// Database port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    pub dbname: String,

    /// Database user
    pub user: String,

    /// Database password
    ///
    /// Stored securely in memory and automatically zeroized on drop.
    /// Usually supplied through `${DB_PASSWORD}` substitution.
    pub password: SecretString,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Timeout for acquiring and creating connections
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("database.host must not be empty".to_string());
        }
        if self.dbname.trim().is_empty() {
            return Err("database.dbname must not be empty".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("database.user must not be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Query template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueriesConfig {
    /// Directory containing the `{source}_count.sql` / `{source}_data.sql`
    /// template files
    #[serde(default = "default_sql_dir")]
    pub sql_dir: String,
}

impl QueriesConfig {
    fn validate(&self) -> Result<(), String> {
        if self.sql_dir.trim().is_empty() {
            return Err("queries.sql_dir must not be empty".to_string());
        }
        Ok(())
    }
}

/// Diagnostics configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Surface the diagnostic log after failures
    ///
    /// A feature flag, not an access-control mechanism: it decides whether
    /// recorded failure detail is shown, nothing more.
    #[serde(default)]
    pub developer_mode: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub file_path: String,

    /// Log rotation: daily or hourly
    #[serde(default = "default_rotation")]
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: default_log_path(),
            file_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !["daily", "hourly"].contains(&self.file_rotation.as_str()) {
            return Err(format!(
                "Invalid file_rotation '{}'. Must be one of: daily, hourly",
                self.file_rotation
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_max_connections() -> usize {
    10
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_sql_dir() -> String {
    "sql".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
