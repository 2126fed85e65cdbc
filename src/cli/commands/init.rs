//! Init command implementation

use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

const STARTER_CONFIG: &str = r#"# Vantage configuration

[application]
log_level = "info"

[database]
host = "localhost"
port = 5432
dbname = "analytics"
user = "vantage"
# Substituted from the environment at load time
password = "${VANTAGE_DB_PASSWORD}"
max_connections = 10
connection_timeout_seconds = 30

[queries]
# Directory holding {source}_count.sql / {source}_data.sql templates
sql_dir = "sql"

[diagnostics]
# Surfaces the diagnostic log after failed runs
developer_mode = false

[logging]
file_enabled = false
file_path = "logs"
file_rotation = "daily"
"#;

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let path = Path::new(config_path);

        if path.exists() && !self.force {
            println!("❌ {config_path} already exists (use --force to overwrite)");
            return Ok(2);
        }

        std::fs::write(path, STARTER_CONFIG)?;
        println!("✅ Wrote starter configuration: {config_path}");
        println!("   Set VANTAGE_DB_PASSWORD before running an export.");
        Ok(0)
    }
}
