//! Validate-config command implementation

use clap::Args;

use crate::adapters::query::{PostgresQueryService, TemplateRegistry};
use crate::config::load_config;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also connect to the database and run a probe query
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("🔍 Validating configuration: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid:");
                println!("   {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("📋 Summary:");
        println!("   Log level:      {}", config.application.log_level);
        println!(
            "   Database:       {}@{}:{}/{}",
            config.database.user, config.database.host, config.database.port, config.database.dbname
        );
        println!("   SQL directory:  {}", config.queries.sql_dir);
        println!("   Developer mode: {}", config.diagnostics.developer_mode);
        println!("   File logging:   {}", config.logging.file_enabled);

        let registry = match TemplateRegistry::load(&config.queries.sql_dir) {
            Ok(r) => r,
            Err(e) => {
                println!();
                println!("❌ Query templates are invalid:");
                println!("   {e}");
                return Ok(2);
            }
        };
        let mut sources: Vec<_> = registry.sources().collect();
        sources.sort_by_key(|s| s.key());
        println!(
            "   Templates:      {} ({})",
            sources.len(),
            sources
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if self.check_connection {
            println!();
            println!("🔌 Testing database connection...");
            let service = PostgresQueryService::connect(&config.database, registry).await?;
            match service.test_connection().await {
                Ok(()) => println!("✅ Database connection succeeded"),
                Err(e) => {
                    println!("❌ Database connection failed: {e}");
                    return Ok(2);
                }
            }
        }

        Ok(0)
    }
}
