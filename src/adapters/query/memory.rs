//! In-memory query service fake
//!
//! Backs the orchestrator tests and dry runs: returns a canned count and
//! table, records every call so tests can assert which queries were (and
//! were not) issued, and can be told to fail either operation.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::adapters::query::traits::QueryService;
use crate::domain::errors::QueryError;
use crate::domain::request::ExportRequest;
use crate::domain::table::Table;

/// One recorded call against the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Count,
    Rows { limit: Option<usize> },
}

/// A canned, call-recording query service
#[derive(Debug, Default)]
pub struct InMemoryQueryService {
    count: u64,
    table: Table,
    count_error: Option<String>,
    rows_error: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryQueryService {
    /// Creates a fake returning the given count and table
    pub fn new(count: u64, table: Table) -> Self {
        Self {
            count,
            table,
            ..Self::default()
        }
    }

    /// Makes `count` fail with a backend error
    pub fn failing_count(mut self, message: impl Into<String>) -> Self {
        self.count_error = Some(message.into());
        self
    }

    /// Makes `rows` fail with a backend error
    pub fn failing_rows(mut self, message: impl Into<String>) -> Self {
        self.rows_error = Some(message.into());
        self
    }

    /// Calls recorded so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }
}

#[async_trait]
impl QueryService for InMemoryQueryService {
    async fn count(&self, _request: &ExportRequest) -> Result<u64, QueryError> {
        self.record(RecordedCall::Count);
        if let Some(message) = &self.count_error {
            return Err(QueryError::Backend(message.clone()));
        }
        Ok(self.count)
    }

    async fn rows(
        &self,
        _request: &ExportRequest,
        limit: Option<usize>,
    ) -> Result<Table, QueryError> {
        self.record(RecordedCall::Rows { limit });
        if let Some(message) = &self.rows_error {
            return Err(QueryError::Backend(message.clone()));
        }
        let mut table = Table::new(self.table.columns().to_vec());
        let rows = match limit {
            Some(n) => &self.table.rows()[..self.table.row_count().min(n)],
            None => self.table.rows(),
        };
        for row in rows {
            table
                .push_row(row.clone())
                .map_err(|e| QueryError::Backend(e.to_string()))?;
        }
        Ok(table)
    }
}
