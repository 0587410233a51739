//! Courier engine: readiness probing, capture, and upload execution.
mod capture;
mod engine;
mod pipeline;
mod probe;
mod types;
mod upload;

pub use capture::SnapshotSource;
pub use engine::{EngineEvent, EngineHandle};
pub use pipeline::{CapturePipeline, EndpointOverride, PipelineConfig};
pub use probe::{HttpReadinessProbe, ProbeSettings, ReadinessProbe};
pub use types::{
    CaptureError, CaptureRequest, PipelineResult, ReadySignal, SkipReason, TabId, UploadError,
};
pub use upload::{HttpSnapshotUploader, SnapshotUploader, UploadSettings};
