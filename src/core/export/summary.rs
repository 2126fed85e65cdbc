//! Preview summary reporting
//!
//! Once a preview is loaded, the host layer shows a short summary of the
//! pending export: how many rows the full export will contain, how wide the
//! result is, and what range was requested.

use crate::domain::request::ExportRequest;
use crate::domain::table::Table;

/// Summary of a gated export shown alongside the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Total rows the full export will contain (from the gating count)
    pub total_rows: u64,

    /// Number of columns in the result set
    pub column_count: usize,

    /// Inclusive day span of the requested range
    pub span_days: i64,

    /// Number of storefronts in the request
    pub storefront_count: usize,
}

impl ExportSummary {
    /// Builds a summary from an annotated request and its preview table
    pub fn from_preview(request: &ExportRequest, preview: &Table) -> Self {
        Self {
            total_rows: request.row_count.unwrap_or(0),
            column_count: preview.column_count(),
            span_days: request.span_days(),
            storefront_count: request.storefront_ids.len(),
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_rows = self.total_rows,
            columns = self.column_count,
            span_days = self.span_days,
            storefronts = self.storefront_count,
            "Preview loaded"
        );
    }
}
