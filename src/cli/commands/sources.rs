//! Sources command implementation

use clap::Args;

use crate::adapters::query::TemplateRegistry;
use crate::config::load_config;
use crate::domain::source::DataSource;

/// Arguments for the sources command
#[derive(Args, Debug)]
pub struct SourcesArgs {}

impl SourcesArgs {
    /// Execute the sources command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        // Template status is best-effort; the listing itself never fails.
        let registry = load_config(config_path)
            .ok()
            .and_then(|config| TemplateRegistry::load(&config.queries.sql_dir).ok());

        println!("📚 Registered data sources:");
        println!();
        for source in DataSource::ALL {
            let templates = match &registry {
                Some(registry) if registry.pair(source).is_ok() => "templates loaded",
                Some(_) => "templates missing",
                None => "templates unchecked",
            };
            let filters = if source.supports_extra_options() {
                "device/display/position filters"
            } else {
                "no extra filters"
            };
            println!(
                "   {:<8} {} ({filters}, {templates})",
                source.key(),
                source.label()
            );
        }
        Ok(0)
    }
}
