//! Per-session export pipeline state
//!
//! One [`SessionState`] exists per interactive session. It is exclusively
//! owned, mutated only by the orchestrator (and the host layer that resets
//! it), and never shared across sessions, so no locking is involved.

use serde::{Deserialize, Serialize};

use crate::domain::request::ExportRequest;
use crate::domain::table::Table;

/// MIME type of the download artifact
pub const DOWNLOAD_MIME: &str = "text/csv";

/// Pipeline stage of the export state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for a submission
    #[default]
    Initial,
    /// Row-count check in flight
    Gating,
    /// Preview loaded, waiting for the export action
    PreviewReady,
    /// Full fetch and serialization in flight
    Exporting,
    /// Download payload available
    DownloadReady,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::Gating => "gating",
            Stage::PreviewReady => "preview_ready",
            Stage::Exporting => "exporting",
            Stage::DownloadReady => "download_ready",
        }
    }
}

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Error,
    Warning,
}

/// A transient message shown to the user once, then cleared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// A serialized export ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// State of one interactive export session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current pipeline stage
    pub stage: Stage,

    /// The active request, if any
    pub current_request: Option<ExportRequest>,

    /// Bounded preview of the result set
    pub preview_table: Option<Table>,

    /// Serialized payload once the export completed
    pub download: Option<Download>,

    user_message: Option<UserMessage>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a message to show the user
    pub fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.user_message = Some(UserMessage {
            kind,
            text: text.into(),
        });
    }

    /// Takes the pending message, clearing it
    pub fn take_message(&mut self) -> Option<UserMessage> {
        self.user_message.take()
    }

    /// Whether a message is pending, without consuming it
    pub fn has_message(&self) -> bool {
        self.user_message.is_some()
    }

    /// Discards any in-flight request, preview, and payload
    ///
    /// Called when a new submission arrives mid-flow: the prior pipeline is
    /// abandoned wholesale before the new one starts.
    pub fn discard_in_flight(&mut self) {
        self.current_request = None;
        self.preview_table = None;
        self.download = None;
        self.stage = Stage::Initial;
    }

    /// Full reset back to the initial stage ("start new export")
    pub fn reset(&mut self) {
        self.discard_in_flight();
        self.user_message = None;
    }
}
