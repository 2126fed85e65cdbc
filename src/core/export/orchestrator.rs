//! Export orchestrator - the pipeline state machine
//!
//! Coordinates validation, row-count gating, preview loading, and the full
//! export. Each session walks the stages
//! `initial -> gating -> preview_ready -> exporting -> download_ready`;
//! gating and exporting suspend only on the single query they depend on.
//! Backend failures never surface raw to the user: they are recorded in the
//! diagnostic log and the session returns to the initial stage with a
//! generic message. Configuration defects propagate as fatal errors.

use std::sync::Arc;

use crate::adapters::query::QueryService;
use crate::core::diagnostics::DiagnosticLog;
use crate::core::export::serializer;
use crate::core::export::session::{Download, MessageKind, SessionState, Stage};
use crate::core::validate::RawSubmission;
use crate::domain::errors::{QueryError, VantageError};
use crate::domain::result::Result;
use crate::domain::source::{DataSource, ExtraOptions};

/// Exports strictly above this row count are rejected during gating
pub const ROW_COUNT_CEILING: u64 = 50_000;

/// Maximum number of rows fetched for the preview
pub const PREVIEW_ROW_LIMIT: usize = 500;

/// The export pipeline orchestrator
///
/// Owns the query service dependency and the diagnostic log; session state
/// is passed in explicitly so one orchestrator can serve many sequential
/// sessions and the state machine stays testable without a UI harness.
pub struct ExportOrchestrator {
    query: Arc<dyn QueryService>,
    diagnostics: DiagnosticLog,
}

impl ExportOrchestrator {
    /// Creates an orchestrator over a query service
    pub fn new(query: Arc<dyn QueryService>) -> Self {
        Self {
            query,
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// Read access to the diagnostic log
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Clears the diagnostic log
    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }

    /// Handles a new submission: validate, gate on the row count, load the
    /// preview
    ///
    /// Any in-flight request (same or different data source) is discarded
    /// first; every submission restarts the pipeline from gating. On
    /// success the session lands in [`Stage::PreviewReady`] with the
    /// count-annotated request and a bounded preview attached. Validation
    /// failures, empty results, and oversized results leave the session in
    /// [`Stage::Initial`] with an explanatory message.
    ///
    /// # Errors
    ///
    /// Returns an error only for configuration defects (unknown source,
    /// missing template); backend failures are handled internally.
    pub async fn submit(
        &mut self,
        session: &mut SessionState,
        submission: RawSubmission,
        data_source: DataSource,
        extra_options: Option<ExtraOptions>,
    ) -> Result<()> {
        session.discard_in_flight();

        let errors = submission.validate();
        if !errors.is_empty() {
            let text = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            tracing::debug!(count = errors.len(), "Submission failed validation");
            session.set_message(MessageKind::Error, text);
            return Ok(());
        }

        let mut request = submission.into_request(data_source, extra_options)?;
        session.stage = Stage::Gating;
        tracing::info!(
            data_source = %request.data_source,
            workspace_id = %request.workspace_id,
            storefronts = request.storefront_ids.len(),
            span_days = request.span_days(),
            "Gating submission"
        );

        let count = match self.query.count(&request).await {
            Ok(count) => count,
            Err(e) => return self.handle_query_failure(session, e, "gating"),
        };

        if count == 0 {
            tracing::info!(data_source = %request.data_source, "Count query matched no rows");
            session.set_message(MessageKind::Warning, "No data found.");
            session.stage = Stage::Initial;
            return Ok(());
        }
        if count > ROW_COUNT_CEILING {
            tracing::warn!(
                data_source = %request.data_source,
                rows = count,
                ceiling = ROW_COUNT_CEILING,
                "Export rejected: result too large"
            );
            session.set_message(
                MessageKind::Error,
                format!("Data is too large ({count} rows); the maximum is {ROW_COUNT_CEILING} rows."),
            );
            session.stage = Stage::Initial;
            return Ok(());
        }

        request.annotate_count(count);

        let preview = match self.query.rows(&request, Some(PREVIEW_ROW_LIMIT)).await {
            Ok(table) => table,
            Err(e) => return self.handle_query_failure(session, e, "preview"),
        };

        tracing::info!(
            data_source = %request.data_source,
            total_rows = count,
            preview_rows = preview.row_count(),
            "Preview ready"
        );
        session.current_request = Some(request);
        session.preview_table = Some(preview);
        session.stage = Stage::PreviewReady;
        Ok(())
    }

    /// Runs the full export for the previewed request
    ///
    /// Fetches the unbounded result set, serializes it, and stores the
    /// download payload. The request was fixed at submission time; no
    /// re-validation happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if no previewed request is active, or for
    /// configuration and serialization defects; backend failures are
    /// handled internally.
    pub async fn export(&mut self, session: &mut SessionState) -> Result<()> {
        if session.stage != Stage::PreviewReady {
            return Err(VantageError::Export(format!(
                "Export is only available from the preview stage, current stage is '{}'",
                session.stage.as_str()
            )));
        }
        let request = session
            .current_request
            .clone()
            .ok_or_else(|| VantageError::Export("No active export request".to_string()))?;

        session.stage = Stage::Exporting;
        tracing::info!(
            data_source = %request.data_source,
            rows = request.row_count,
            "Exporting full result set"
        );

        let table = match self.query.rows(&request, None).await {
            Ok(table) => table,
            Err(e) => return self.handle_query_failure(session, e, "exporting"),
        };

        let bytes = serializer::serialize(&table)?;
        let filename = request.filename();
        tracing::info!(
            data_source = %request.data_source,
            rows = table.row_count(),
            bytes = bytes.len(),
            filename = %filename,
            "Export serialized"
        );
        session.download = Some(Download { filename, bytes });
        session.stage = Stage::DownloadReady;
        Ok(())
    }

    /// Resets the session for a new export
    pub fn restart(&self, session: &mut SessionState) {
        tracing::debug!("Session restart");
        session.reset();
    }

    /// Converts a backend failure into a generic user message
    ///
    /// Configuration errors are fatal and propagate unchanged.
    fn handle_query_failure(
        &mut self,
        session: &mut SessionState,
        error: QueryError,
        phase: &str,
    ) -> Result<()> {
        if !error.is_backend() {
            return Err(error.into());
        }
        self.diagnostics.record(
            error.kind(),
            error.to_string(),
            format!("phase={phase}: {error:?}"),
        );
        session.set_message(
            MessageKind::Error,
            "A technical error occurred. See the diagnostic log.",
        );
        session.stage = Stage::Initial;
        Ok(())
    }
}
