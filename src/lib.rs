// Vantage - Storefront Analytics Export Tool
// Copyright (c) 2025 Vantage Contributors
// Licensed under the MIT License

//! # Vantage - Storefront Analytics Export
//!
//! Vantage is a reporting tool built in Rust that exports storefront
//! analytics data (keyword lab, keyword performance, product tracking)
//! from PostgreSQL to CSV files that open cleanly in spreadsheet tools.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Validating** export requests (workspace, storefronts, date range)
//! - **Gating** exports on row count before any data is pulled
//! - **Previewing** a capped slice of the result set
//! - **Serializing** full result sets to BOM-prefixed CSV
//!
//! ## Architecture
//!
//! Vantage follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (validation, export pipeline, diagnostics)
//! - [`adapters`] - External integrations (PostgreSQL query backend)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vantage::adapters::query::{PostgresQueryService, TemplateRegistry};
//! use vantage::config::load_config;
//! use vantage::core::export::session::SessionState;
//! use vantage::core::export::ExportOrchestrator;
//! use vantage::core::validate::RawSubmission;
//! use vantage::domain::source::DataSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("vantage.toml")?;
//!     let registry = TemplateRegistry::load(&config.queries.sql_dir)?;
//!     let service = PostgresQueryService::connect(&config.database, registry).await?;
//!
//!     let mut orchestrator = ExportOrchestrator::new(Arc::new(service));
//!     let mut session = SessionState::new();
//!
//!     let submission = RawSubmission {
//!         workspace_id: "123".to_string(),
//!         storefront_ids: "1,2".to_string(),
//!         start_date: "2024-01-01".parse()?,
//!         end_date: "2024-01-31".parse()?,
//!     };
//!     orchestrator
//!         .submit(&mut session, submission, DataSource::KeywordLab, None)
//!         .await?;
//!     orchestrator.export(&mut session).await?;
//!
//!     if let Some(download) = &session.download {
//!         std::fs::write(&download.filename, &download.bytes)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Vantage uses the [`domain::errors::VantageError`] type for all errors.
//! Query backend failures are caught by the pipeline, recorded in the
//! diagnostic log, and reported to the user as a generic message; only
//! configuration defects propagate as hard errors.
//!
//! ## Logging
//!
//! Vantage uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!(data_source = "kwl", "Starting export");
//! warn!(row_count = 0, "No data found");
//! error!(error = ?std::io::Error::other("boom"), "Query failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
