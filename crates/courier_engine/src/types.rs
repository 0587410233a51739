use std::fmt;

use thiserror::Error;

/// Host tab identifier.
pub type TabId = u64;

/// Tab a capture cycle operates on, resolved at trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub tab_id: TabId,
    pub page_url: String,
}

/// Backend readiness as reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySignal {
    /// The endpoint answered 202 and wants an upload now.
    Ready,
    /// Any other status, or a transport failure.
    NotReady,
}

/// Why a cycle ended before the probe ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No tab was focused when the trigger fired.
    NoActiveTab,
    /// The target tab closed between trigger and lookup.
    TabGone,
}

/// Outcome of one capture cycle. Observability only; nothing downstream
/// branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Skipped { reason: SkipReason },
    NotReady,
    CaptureFailed,
    /// Non-2xx PUT response; `status` is 0 for transport-level failures.
    UploadFailed { status: u16 },
    Success,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoActiveTab => write!(f, "no active tab"),
            SkipReason::TabGone => write!(f, "tab gone"),
        }
    }
}

impl fmt::Display for PipelineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineResult::Skipped { reason } => write!(f, "skipped ({reason})"),
            PipelineResult::NotReady => write!(f, "backend not ready"),
            PipelineResult::CaptureFailed => write!(f, "capture failed"),
            PipelineResult::UploadFailed { status: 0 } => {
                write!(f, "upload failed in transport")
            }
            PipelineResult::UploadFailed { status } => {
                write!(f, "upload failed with status {status}")
            }
            PipelineResult::Success => write!(f, "success"),
        }
    }
}

/// Snapshot engine failure surfaced through [`crate::SnapshotSource`].
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("snapshot engine unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("endpoint rejected upload with status {status}")]
    Rejected { status: u16 },
    #[error("transport failure: {0}")]
    Transport(String),
}
