//! Export command implementation
//!
//! Drives the full pipeline non-interactively: submit, gate, preview,
//! export, and write the CSV payload to disk.

use chrono::{NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::adapters::query::{PostgresQueryService, TemplateRegistry};
use crate::config::load_config;
use crate::core::export::presets::DatePreset;
use crate::core::export::session::{MessageKind, SessionState, Stage};
use crate::core::export::summary::ExportSummary;
use crate::core::export::ExportOrchestrator;
use crate::core::validate::RawSubmission;
use crate::domain::request::ExportRequest;
use crate::domain::source::{DataSource, DeviceType, DisplayType, ExtraOptions, ProductPosition};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Data source key (kwl, kw_pfm, pt)
    #[arg(short, long)]
    pub source: String,

    /// Workspace ID
    #[arg(short, long)]
    pub workspace: String,

    /// Comma-separated storefront IDs (up to 5)
    #[arg(long)]
    pub storefronts: String,

    /// Start date (YYYY-MM-DD); requires --end-date
    #[arg(long, requires = "end_date", conflicts_with = "preset")]
    pub start_date: Option<NaiveDate>,

    /// End date (YYYY-MM-DD); requires --start-date
    #[arg(long, requires = "start_date", conflicts_with = "preset")]
    pub end_date: Option<NaiveDate>,

    /// Date preset (last-30-days, this-month, last-month)
    #[arg(long)]
    pub preset: Option<DatePreset>,

    /// Device type filter (keyword-performance only)
    #[arg(long)]
    pub device_type: Option<DeviceType>,

    /// Display type filter (keyword-performance only)
    #[arg(long)]
    pub display_type: Option<DisplayType>,

    /// Product position filter (keyword-performance only)
    #[arg(long)]
    pub product_position: Option<ProductPosition>,

    /// Output file path (defaults to the request's download filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use a date-stamped filename (e.g. kwl_2024-03-05.csv)
    #[arg(long)]
    pub date_stamp: bool,

    /// Stop after the preview without exporting the full result set
    #[arg(long)]
    pub preview_only: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let data_source = match DataSource::from_str(&self.source) {
            Ok(source) => source,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let (start_date, end_date) = self.resolve_dates();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let registry = match TemplateRegistry::load(&config.queries.sql_dir) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to load query templates: {e}");
                return Ok(2);
            }
        };

        let service = PostgresQueryService::connect(&config.database, registry).await?;
        let mut orchestrator = ExportOrchestrator::new(Arc::new(service));
        let mut session = SessionState::new();

        let submission = RawSubmission {
            workspace_id: self.workspace.clone(),
            storefront_ids: self.storefronts.clone(),
            start_date,
            end_date,
        };
        let extra_options = self.extra_options(data_source);

        println!(
            "🔍 Checking data size for {} ({start_date}..{end_date})",
            data_source.label()
        );
        orchestrator
            .submit(&mut session, submission, data_source, extra_options)
            .await?;

        if session.stage != Stage::PreviewReady {
            return Ok(Self::report_abort(
                &mut session,
                &orchestrator,
                config.diagnostics.developer_mode,
            ));
        }

        if let (Some(request), Some(preview)) = (&session.current_request, &session.preview_table)
        {
            let summary = ExportSummary::from_preview(request, preview);
            summary.log_summary();
            println!("✅ Preview loaded");
            println!("   Total rows:  {}", summary.total_rows);
            println!("   Columns:     {}", summary.column_count);
            println!("   Date range:  {} days", summary.span_days);
            println!("   Storefronts: {}", summary.storefront_count);
        }

        if self.preview_only {
            return Ok(0);
        }

        println!("📦 Exporting full result set");
        orchestrator.export(&mut session).await?;

        if session.stage != Stage::DownloadReady {
            return Ok(Self::report_abort(
                &mut session,
                &orchestrator,
                config.diagnostics.developer_mode,
            ));
        }

        let (Some(download), Some(request)) =
            (session.download.as_ref(), session.current_request.as_ref())
        else {
            anyhow::bail!("download payload missing after export");
        };
        let path = self.output_path(request);
        std::fs::write(&path, &download.bytes)?;
        println!(
            "✅ Export written: {} ({} bytes)",
            path.display(),
            download.bytes.len()
        );
        Ok(0)
    }

    /// Resolves the requested date range; defaults to the last-30-days
    /// preset when nothing was given
    fn resolve_dates(&self) -> (NaiveDate, NaiveDate) {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            return (start, end);
        }
        let preset = self.preset.unwrap_or(DatePreset::Last30Days);
        preset.resolve(Utc::now().date_naive())
    }

    fn extra_options(&self, data_source: DataSource) -> Option<ExtraOptions> {
        let any_given = self.device_type.is_some()
            || self.display_type.is_some()
            || self.product_position.is_some();
        if !data_source.supports_extra_options() {
            if any_given {
                println!(
                    "⚠️  Filter options are only supported for kw_pfm and were ignored for {}",
                    data_source
                );
            }
            return None;
        }
        Some(ExtraOptions {
            device_type: self.device_type.unwrap_or_default(),
            display_type: self.display_type.unwrap_or_default(),
            product_position: self.product_position.unwrap_or_default(),
        })
    }

    fn output_path(&self, request: &ExportRequest) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        if self.date_stamp {
            PathBuf::from(request.date_stamped_filename(Utc::now().date_naive()))
        } else {
            PathBuf::from(request.filename())
        }
    }

    /// Prints the pipeline's user message and, in developer mode, the
    /// recorded diagnostics; returns the exit code
    fn report_abort(
        session: &mut SessionState,
        orchestrator: &ExportOrchestrator,
        developer_mode: bool,
    ) -> i32 {
        let code = match session.take_message() {
            Some(msg) => match msg.kind {
                MessageKind::Error => {
                    println!("❌ {}", msg.text);
                    1
                }
                MessageKind::Warning => {
                    println!("⚠️  {}", msg.text);
                    0
                }
            },
            None => {
                println!("❌ Export did not complete");
                1
            }
        };

        if developer_mode && !orchestrator.diagnostics().is_empty() {
            println!();
            println!("🛠️  Diagnostic log:");
            for record in orchestrator.diagnostics().entries() {
                println!(
                    "   [{}] {}: {}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.error_kind,
                    record.message
                );
                println!("     {}", record.trace);
            }
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExportArgs,
    }

    #[test]
    fn test_explicit_dates_win_over_preset_default() {
        let harness = Harness::parse_from([
            "export",
            "--source",
            "kwl",
            "--workspace",
            "123",
            "--storefronts",
            "1,2",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-15",
        ]);
        let (start, end) = harness.args.resolve_dates();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_extras_ignored_for_unsupporting_source() {
        let harness = Harness::parse_from([
            "export",
            "--source",
            "kwl",
            "--workspace",
            "123",
            "--storefronts",
            "1",
            "--device-type",
            "mobile",
        ]);
        assert!(harness.args.extra_options(DataSource::KeywordLab).is_none());
    }

    #[test]
    fn test_extras_built_for_keyword_performance() {
        let harness = Harness::parse_from([
            "export",
            "--source",
            "kw_pfm",
            "--workspace",
            "123",
            "--storefronts",
            "1",
            "--device-type",
            "mobile",
            "--display-type",
            "paid",
        ]);
        let options = harness
            .args
            .extra_options(DataSource::KeywordPerformance)
            .unwrap();
        assert_eq!(options.device_type, DeviceType::Mobile);
        assert_eq!(options.display_type, DisplayType::Paid);
        assert_eq!(options.product_position, ProductPosition::All);
    }
}
