//! Integration tests for the export pipeline state machine

use std::sync::Arc;

use chrono::NaiveDate;
use vantage::adapters::query::{InMemoryQueryService, RecordedCall};
use vantage::core::export::session::{MessageKind, SessionState, Stage};
use vantage::core::export::{ExportOrchestrator, PREVIEW_ROW_LIMIT, ROW_COUNT_CEILING};
use vantage::core::validate::RawSubmission;
use vantage::domain::errors::VantageError;
use vantage::domain::source::DataSource;
use vantage::domain::table::{CellValue, Table};

fn submission(storefronts: &str) -> RawSubmission {
    RawSubmission {
        workspace_id: "123".to_string(),
        storefront_ids: storefronts.to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

fn table_with_rows(n: usize) -> Table {
    let mut table = Table::new(vec!["keyword".to_string(), "rank".to_string()]);
    for i in 0..n {
        table
            .push_row(vec![
                CellValue::Text(format!("kw-{i}")),
                CellValue::Int(i as i64),
            ])
            .unwrap();
    }
    table
}

fn harness(count: u64, rows: usize) -> (ExportOrchestrator, Arc<InMemoryQueryService>) {
    let service = Arc::new(InMemoryQueryService::new(count, table_with_rows(rows)));
    (ExportOrchestrator::new(service.clone()), service)
}

#[tokio::test]
async fn test_submit_reaches_preview_ready() {
    let (mut orchestrator, service) = harness(42, 42);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1,2"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::PreviewReady);
    assert!(!session.has_message());

    let request = session.current_request.as_ref().unwrap();
    assert_eq!(request.row_count, Some(42));
    assert_eq!(session.preview_table.as_ref().unwrap().row_count(), 42);
    assert_eq!(
        service.calls(),
        vec![
            RecordedCall::Count,
            RecordedCall::Rows {
                limit: Some(PREVIEW_ROW_LIMIT)
            }
        ]
    );
}

#[tokio::test]
async fn test_preview_is_capped() {
    let (mut orchestrator, _service) = harness(2_000, 2_000);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::PreviewReady);
    assert_eq!(
        session.preview_table.as_ref().unwrap().row_count(),
        PREVIEW_ROW_LIMIT
    );
    assert_eq!(session.current_request.as_ref().unwrap().row_count, Some(2_000));
}

#[tokio::test]
async fn test_empty_result_warns_without_fetching_rows() {
    let (mut orchestrator, service) = harness(0, 0);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::Initial);
    assert!(session.preview_table.is_none());
    let msg = session.take_message().unwrap();
    assert_eq!(msg.kind, MessageKind::Warning);
    assert_eq!(msg.text, "No data found.");
    assert_eq!(service.calls(), vec![RecordedCall::Count]);
}

#[tokio::test]
async fn test_oversized_result_is_rejected_with_count() {
    let (mut orchestrator, service) = harness(ROW_COUNT_CEILING + 1, 10);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::Initial);
    let msg = session.take_message().unwrap();
    assert_eq!(msg.kind, MessageKind::Error);
    assert!(msg.text.contains("50001"));
    assert!(msg.text.contains("50000"));
    assert_eq!(service.calls(), vec![RecordedCall::Count]);
}

#[tokio::test]
async fn test_ceiling_is_inclusive() {
    let (mut orchestrator, _service) = harness(ROW_COUNT_CEILING, 10);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::PreviewReady);
}

#[tokio::test]
async fn test_invalid_submission_issues_no_queries() {
    let (mut orchestrator, service) = harness(42, 42);
    let mut session = SessionState::new();

    let bad = RawSubmission {
        workspace_id: "abc".to_string(),
        storefront_ids: "1,2,3,4,5,6".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    };
    orchestrator
        .submit(&mut session, bad, DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::Initial);
    let msg = session.take_message().unwrap();
    assert_eq!(msg.kind, MessageKind::Error);
    // All violations are reported together, one per line
    assert_eq!(msg.text.lines().count(), 3);
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_full_export_produces_bom_prefixed_csv() {
    let (mut orchestrator, service) = harness(42, 42);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1,2"), DataSource::KeywordLab, None)
        .await
        .unwrap();
    orchestrator.export(&mut session).await.unwrap();

    assert_eq!(session.stage, Stage::DownloadReady);
    let download = session.download.as_ref().unwrap();
    assert_eq!(download.filename, "kwl.csv");
    assert!(download.bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = std::str::from_utf8(&download.bytes[3..]).unwrap();
    assert!(text.starts_with("keyword,rank\n"));

    // The full fetch runs unbounded
    assert_eq!(
        service.calls().last(),
        Some(&RecordedCall::Rows { limit: None })
    );
}

#[tokio::test]
async fn test_export_requires_preview_stage() {
    let (mut orchestrator, _service) = harness(42, 42);
    let mut session = SessionState::new();

    let err = orchestrator.export(&mut session).await.unwrap_err();
    assert!(matches!(err, VantageError::Export(_)));
    assert_eq!(session.stage, Stage::Initial);
}

#[tokio::test]
async fn test_resubmission_discards_previous_download() {
    let (mut orchestrator, _service) = harness(42, 42);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();
    orchestrator.export(&mut session).await.unwrap();
    assert!(session.download.is_some());

    orchestrator
        .submit(
            &mut session,
            submission("1"),
            DataSource::ProductTracking,
            None,
        )
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::PreviewReady);
    assert!(session.download.is_none());
    assert_eq!(
        session.current_request.as_ref().unwrap().data_source,
        DataSource::ProductTracking
    );
}

#[tokio::test]
async fn test_backend_count_failure_is_masked_and_logged() {
    let service = Arc::new(
        InMemoryQueryService::new(42, table_with_rows(42)).failing_count("connection refused"),
    );
    let mut orchestrator = ExportOrchestrator::new(service.clone());
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(session.stage, Stage::Initial);
    let msg = session.take_message().unwrap();
    assert_eq!(msg.kind, MessageKind::Error);
    assert_eq!(msg.text, "A technical error occurred. See the diagnostic log.");
    assert!(!msg.text.contains("connection refused"));

    assert_eq!(orchestrator.diagnostics().len(), 1);
    let record = &orchestrator.diagnostics().entries()[0];
    assert!(record.message.contains("connection refused"));
}

#[tokio::test]
async fn test_backend_export_failure_returns_to_initial() {
    let service = Arc::new(
        InMemoryQueryService::new(42, table_with_rows(42)).failing_rows("timeout expired"),
    );
    let mut orchestrator = ExportOrchestrator::new(service.clone());
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    // The preview fetch already fails here
    assert_eq!(session.stage, Stage::Initial);
    assert!(session.has_message());
    assert_eq!(orchestrator.diagnostics().len(), 1);
}

#[tokio::test]
async fn test_restart_clears_session() {
    let (mut orchestrator, _service) = harness(42, 42);
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();
    orchestrator.export(&mut session).await.unwrap();

    orchestrator.restart(&mut session);
    assert_eq!(session.stage, Stage::Initial);
    assert!(session.current_request.is_none());
    assert!(session.preview_table.is_none());
    assert!(session.download.is_none());
}

#[tokio::test]
async fn test_diagnostics_survive_across_submissions_until_cleared() {
    let service = Arc::new(
        InMemoryQueryService::new(42, table_with_rows(42)).failing_count("flaky backend"),
    );
    let mut orchestrator = ExportOrchestrator::new(service.clone());
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, submission("1"), DataSource::KeywordLab, None)
        .await
        .unwrap();
    session.take_message();
    orchestrator
        .submit(&mut session, submission("2"), DataSource::KeywordLab, None)
        .await
        .unwrap();

    assert_eq!(orchestrator.diagnostics().len(), 2);
    orchestrator.clear_diagnostics();
    assert!(orchestrator.diagnostics().is_empty());
}
