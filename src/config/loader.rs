//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{LoggingConfig, VantageConfig};
use crate::config::secret::secret_string;
use crate::domain::errors::VantageError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VantageConfig
/// 4. Applies environment variable overrides (VANTAGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<VantageConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VantageError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VantageError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VantageConfig = toml::from_str(&contents)
        .map_err(|e| VantageError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VantageError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Best-effort logging configuration for process startup
///
/// Logging has to come up before any command runs, including the ones that
/// run without a usable configuration file (`init`, `validate-config` on a
/// broken file), so load failures fall back to console-only defaults and
/// the command reports the configuration problem itself.
pub fn load_logging_config(path: impl AsRef<Path>) -> LoggingConfig {
    load_config(path).map(|c| c.logging).unwrap_or_default()
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VantageError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the VANTAGE_* prefix
///
/// Environment variables follow the pattern: VANTAGE_<SECTION>_<KEY>
/// For example: VANTAGE_DATABASE_HOST, VANTAGE_QUERIES_SQL_DIR
fn apply_env_overrides(config: &mut VantageConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("VANTAGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Database overrides
    if let Ok(val) = std::env::var("VANTAGE_DATABASE_HOST") {
        config.database.host = val;
    }
    if let Ok(val) = std::env::var("VANTAGE_DATABASE_PORT") {
        if let Ok(port) = val.parse() {
            config.database.port = port;
        }
    }
    if let Ok(val) = std::env::var("VANTAGE_DATABASE_DBNAME") {
        config.database.dbname = val;
    }
    if let Ok(val) = std::env::var("VANTAGE_DATABASE_USER") {
        config.database.user = val;
    }
    if let Ok(val) = std::env::var("VANTAGE_DATABASE_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("VANTAGE_DATABASE_MAX_CONNECTIONS") {
        if let Ok(size) = val.parse() {
            config.database.max_connections = size;
        }
    }

    // Query overrides
    if let Ok(val) = std::env::var("VANTAGE_QUERIES_SQL_DIR") {
        config.queries.sql_dir = val;
    }

    // Diagnostics overrides
    if let Ok(val) = std::env::var("VANTAGE_DIAGNOSTICS_DEVELOPER_MODE") {
        config.diagnostics.developer_mode = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VANTAGE_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VANTAGE_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
}
