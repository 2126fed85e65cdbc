//! Export pipeline: state machine, session state, serialization
//!
//! This module contains the central subsystem: the orchestrator that walks
//! a session through validation, gating, preview, and download, plus the
//! CSV serializer that produces the payload.

pub mod orchestrator;
pub mod presets;
pub mod serializer;
pub mod session;
pub mod summary;

pub use orchestrator::{ExportOrchestrator, PREVIEW_ROW_LIMIT, ROW_COUNT_CEILING};
pub use presets::DatePreset;
pub use serializer::serialize;
pub use session::{Download, MessageKind, SessionState, Stage, UserMessage, DOWNLOAD_MIME};
pub use summary::ExportSummary;
