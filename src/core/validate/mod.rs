//! Input validation for export submissions
//!
//! The validator is a pure function over the raw user input: it reports
//! every violation it finds rather than stopping at the first one, so the
//! caller can surface a complete, itemized list. The one ordering rule is
//! that the date-span policy is only measured once the dates are known to
//! be in order.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::errors::VantageError;
use crate::domain::ids::{StorefrontId, WorkspaceId};
use crate::domain::request::{ExportRequest, MAX_STOREFRONTS};
use crate::domain::result::Result;
use crate::domain::source::{DataSource, ExtraOptions};

/// Allowed inclusive date span for up to two storefronts
pub const MAX_SPAN_DAYS_SMALL: i64 = 60;

/// Allowed inclusive date span for three or more storefronts
pub const MAX_SPAN_DAYS_LARGE: i64 = 30;

/// A single validation failure, phrased for the end user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Workspace ID is required")]
    WorkspaceRequired,

    #[error("You can only enter one workspace ID.")]
    WorkspaceNotSingle,

    #[error("Workspace ID must be numeric.")]
    WorkspaceNotNumeric,

    #[error("Storefront ID is required")]
    StorefrontRequired,

    #[error("You can only enter up to {MAX_STOREFRONTS} storefront IDs.")]
    StorefrontTooMany,

    #[error("Storefront ID must be numeric.")]
    StorefrontNotNumeric,

    #[error("Start date cannot be after end date.")]
    DateOrder,

    #[error("With {storefronts} storefront(s), the max period is {max_days} days.")]
    SpanTooLong { storefronts: usize, max_days: i64 },
}

/// Raw, unvalidated user input for one export submission
///
/// The id fields are free-form comma-separated text exactly as typed.
#[derive(Debug, Clone)]
pub struct RawSubmission {
    pub workspace_id: String,
    pub storefront_ids: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RawSubmission {
    /// Validates the submission, returning every violation found
    ///
    /// An empty vector means the submission is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.validate_workspace(&mut errors);
        self.validate_storefronts(&mut errors);
        self.validate_dates(&mut errors);
        errors
    }

    fn validate_workspace(&self, errors: &mut Vec<ValidationError>) {
        let tokens = split_tokens(&self.workspace_id);
        if tokens.is_empty() {
            errors.push(ValidationError::WorkspaceRequired);
        } else if tokens.len() > 1 {
            errors.push(ValidationError::WorkspaceNotSingle);
        } else if !tokens.iter().all(|t| is_numeric(t)) {
            errors.push(ValidationError::WorkspaceNotNumeric);
        }
    }

    fn validate_storefronts(&self, errors: &mut Vec<ValidationError>) {
        let tokens = split_tokens(&self.storefront_ids);
        if tokens.is_empty() {
            errors.push(ValidationError::StorefrontRequired);
        } else if tokens.len() > MAX_STOREFRONTS {
            errors.push(ValidationError::StorefrontTooMany);
        } else if !tokens.iter().all(|t| is_numeric(t)) {
            errors.push(ValidationError::StorefrontNotNumeric);
        }
    }

    fn validate_dates(&self, errors: &mut Vec<ValidationError>) {
        if self.start_date > self.end_date {
            errors.push(ValidationError::DateOrder);
            return;
        }
        // Span policy depends on the storefront count; the token count is
        // used even when the storefront field has its own violations.
        let storefronts = split_tokens(&self.storefront_ids).len();
        let max_days = if storefronts <= 2 {
            MAX_SPAN_DAYS_SMALL
        } else {
            MAX_SPAN_DAYS_LARGE
        };
        let span = (self.end_date - self.start_date).num_days() + 1;
        if span > max_days {
            errors.push(ValidationError::SpanTooLong {
                storefronts,
                max_days,
            });
        }
    }

    /// Converts a validated submission into a normalized request
    ///
    /// # Errors
    ///
    /// Returns a validation error if the submission was never validated or
    /// failed validation; the orchestrator only calls this after a clean
    /// [`RawSubmission::validate`] pass.
    pub fn into_request(
        self,
        data_source: DataSource,
        extra_options: Option<ExtraOptions>,
    ) -> Result<ExportRequest> {
        let workspace_tokens = split_tokens(&self.workspace_id);
        let workspace_raw = workspace_tokens
            .first()
            .ok_or_else(|| VantageError::Validation("Workspace ID is required".to_string()))?;
        let workspace_id: WorkspaceId =
            workspace_raw.parse().map_err(VantageError::Validation)?;

        let storefront_ids = split_tokens(&self.storefront_ids)
            .into_iter()
            .map(|t| t.parse::<StorefrontId>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(VantageError::Validation)?;

        ExportRequest::new(
            data_source,
            workspace_id,
            storefront_ids,
            self.start_date,
            self.end_date,
            extra_options,
        )
    }
}

/// Splits a comma-separated field into trimmed, non-empty tokens
fn split_tokens(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
