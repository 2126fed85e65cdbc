//! Query service abstraction
//!
//! The core consumes query execution through this trait so the orchestrator
//! can be tested against an in-memory fake without a database.

use async_trait::async_trait;

use crate::domain::errors::QueryError;
use crate::domain::request::ExportRequest;
use crate::domain::table::Table;

/// Parameterized query execution for one export request
///
/// Both operations bind the same named parameters from the request:
/// workspace id as a scalar, storefront ids as an ordered set, the dates as
/// ISO-8601 strings, plus the report-specific extras when present. Result
/// ordering is the query template's responsibility.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Executes the data source's `count` template
    ///
    /// Returns the first column of the first row, or `0` when the count
    /// query returned no rows.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Backend`] for execution failures and
    /// [`QueryError::Configuration`] for missing templates.
    async fn count(&self, request: &ExportRequest) -> Result<u64, QueryError>;

    /// Executes the data source's `data` template
    ///
    /// When `limit` is given, the result set is bounded to that many rows.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`QueryService::count`].
    async fn rows(&self, request: &ExportRequest, limit: Option<usize>)
        -> Result<Table, QueryError>;
}
