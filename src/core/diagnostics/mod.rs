//! Diagnostic log sink for backend failures
//!
//! Backend query failures are never shown to the end user directly; the
//! orchestrator converts them into a generic message and appends the full
//! detail here. The log is append-only during normal operation and survives
//! a session reset. Whether it is surfaced at all is controlled by the
//! `developer_mode` configuration flag, which is a feature flag rather than
//! an access-control mechanism.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// When the failure was recorded
    pub timestamp: DateTime<Utc>,

    /// Short error classification (e.g. "backend")
    pub error_kind: String,

    /// Human-readable failure message
    pub message: String,

    /// Full detail: debug representation plus the pipeline phase
    pub trace: String,
}

/// Append-only list of diagnostic records
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    records: Vec<DiagnosticRecord>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and mirrors it to the structured log
    pub fn record(
        &mut self,
        error_kind: impl Into<String>,
        message: impl Into<String>,
        trace: impl Into<String>,
    ) {
        let record = DiagnosticRecord {
            timestamp: Utc::now(),
            error_kind: error_kind.into(),
            message: message.into(),
            trace: trace.into(),
        };
        tracing::error!(
            error_kind = %record.error_kind,
            message = %record.message,
            "Recorded diagnostic entry"
        );
        self.records.push(record);
    }

    /// All records, oldest first
    pub fn entries(&self) -> &[DiagnosticRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears the log (the developer panel's "clear logs" action)
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_in_order() {
        let mut log = DiagnosticLog::new();
        assert!(log.is_empty());

        log.record("backend", "first", "trace-1");
        log.record("backend", "second", "trace-2");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message, "first");
        assert_eq!(log.entries()[1].message, "second");
    }

    #[test]
    fn test_clear() {
        let mut log = DiagnosticLog::new();
        log.record("backend", "boom", "trace");
        log.clear();
        assert!(log.is_empty());
    }
}
