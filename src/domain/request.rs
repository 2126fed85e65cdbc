//! Validated export request
//!
//! An [`ExportRequest`] is the normalized description of one export: which
//! report, for which workspace and storefronts, over which date range. It
//! is built once from validated input and never partially mutated afterwards,
//! with one exception: the row-count annotation recorded after gating.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::VantageError;
use crate::domain::ids::{StorefrontId, WorkspaceId};
use crate::domain::result::Result;
use crate::domain::source::{DataSource, ExtraOptions};

/// Maximum number of storefronts per request
pub const MAX_STOREFRONTS: usize = 5;

/// A validated, normalized export request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Report type to export
    pub data_source: DataSource,

    /// Owning workspace, exactly one
    pub workspace_id: WorkspaceId,

    /// Storefronts to include, 1..=5, order preserved
    pub storefront_ids: Vec<StorefrontId>,

    /// Inclusive start of the date range
    pub start_date: NaiveDate,

    /// Inclusive end of the date range
    pub end_date: NaiveDate,

    /// Report-specific filter options, only for sources that support them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_options: Option<ExtraOptions>,

    /// Row count recorded by the gating query, set exactly once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
}

impl ExportRequest {
    /// Creates a new export request, enforcing structural invariants
    ///
    /// The validator is the user-facing gatekeeper; this constructor is the
    /// last line of defense for programmatic callers.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the storefront list is empty or larger
    /// than [`MAX_STOREFRONTS`], or if the dates are out of order.
    pub fn new(
        data_source: DataSource,
        workspace_id: WorkspaceId,
        storefront_ids: Vec<StorefrontId>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        extra_options: Option<ExtraOptions>,
    ) -> Result<Self> {
        if storefront_ids.is_empty() {
            return Err(VantageError::Validation(
                "At least one storefront ID is required".to_string(),
            ));
        }
        if storefront_ids.len() > MAX_STOREFRONTS {
            return Err(VantageError::Validation(format!(
                "At most {MAX_STOREFRONTS} storefront IDs are allowed, got {}",
                storefront_ids.len()
            )));
        }
        if start_date > end_date {
            return Err(VantageError::Validation(
                "Start date cannot be after end date".to_string(),
            ));
        }
        let extra_options = if data_source.supports_extra_options() {
            Some(extra_options.unwrap_or_default())
        } else {
            None
        };
        Ok(Self {
            data_source,
            workspace_id,
            storefront_ids,
            start_date,
            end_date,
            extra_options,
            row_count: None,
        })
    }

    /// Inclusive length of the date range in days
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Records the gating row count on the request
    pub fn annotate_count(&mut self, count: u64) {
        self.row_count = Some(count);
    }

    /// Download filename for this request
    pub fn filename(&self) -> String {
        format!("{}.csv", self.data_source.key())
    }

    /// Date-stamped download filename variant
    pub fn date_stamped_filename(&self, date: NaiveDate) -> String {
        format!("{}_{}.csv", self.data_source.key(), date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> ExportRequest {
        ExportRequest::new(
            DataSource::KeywordLab,
            WorkspaceId::new(123),
            vec![StorefrontId::new(1), StorefrontId::new(2)],
            date(2024, 1, 1),
            date(2024, 1, 15),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_span_is_inclusive() {
        assert_eq!(request().span_days(), 15);
    }

    #[test]
    fn test_rejects_empty_storefronts() {
        let result = ExportRequest::new(
            DataSource::KeywordLab,
            WorkspaceId::new(1),
            vec![],
            date(2024, 1, 1),
            date(2024, 1, 2),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_too_many_storefronts() {
        let ids = (1..=6).map(StorefrontId::new).collect();
        let result = ExportRequest::new(
            DataSource::KeywordLab,
            WorkspaceId::new(1),
            ids,
            date(2024, 1, 1),
            date(2024, 1, 2),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_reversed_dates() {
        let result = ExportRequest::new(
            DataSource::KeywordLab,
            WorkspaceId::new(1),
            vec![StorefrontId::new(1)],
            date(2024, 2, 1),
            date(2024, 1, 1),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_extras_dropped_for_unsupporting_source() {
        assert!(request().extra_options.is_none());
    }

    #[test]
    fn test_extras_defaulted_for_keyword_performance() {
        let req = ExportRequest::new(
            DataSource::KeywordPerformance,
            WorkspaceId::new(1),
            vec![StorefrontId::new(1)],
            date(2024, 1, 1),
            date(2024, 1, 2),
            None,
        )
        .unwrap();
        assert!(req.extra_options.is_some());
    }

    #[test]
    fn test_count_annotation() {
        let mut req = request();
        assert_eq!(req.row_count, None);
        req.annotate_count(42);
        assert_eq!(req.row_count, Some(42));
    }

    #[test]
    fn test_filenames() {
        let req = request();
        assert_eq!(req.filename(), "kwl.csv");
        assert_eq!(
            req.date_stamped_filename(date(2024, 3, 5)),
            "kwl_2024-03-05.csv"
        );
    }
}
