use std::sync::Arc;

use courier_logging::{courier_info, courier_warn};
use url::Url;

use crate::probe::{HttpReadinessProbe, ProbeSettings, ReadinessProbe};
use crate::upload::{HttpSnapshotUploader, SnapshotUploader, UploadSettings};
use crate::{CaptureRequest, PipelineResult, ReadySignal, SnapshotSource, UploadError};

/// Per-run override lookup, injected by the embedder so settings edits
/// take effect without rebuilding the pipeline.
pub type EndpointOverride = Arc<dyn Fn() -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub struct PipelineConfig {
    pub default_endpoint: Url,
    pub endpoint_override: EndpointOverride,
}

impl PipelineConfig {
    /// Config with no override source; every run uses `default_endpoint`.
    pub fn fixed(default_endpoint: Url) -> Self {
        Self {
            default_endpoint,
            endpoint_override: Arc::new(|| None),
        }
    }
}

pub struct CapturePipeline {
    config: PipelineConfig,
    probe: Arc<dyn ReadinessProbe>,
    snapshots: Arc<dyn SnapshotSource>,
    uploader: Arc<dyn SnapshotUploader>,
}

impl CapturePipeline {
    pub fn new(
        config: PipelineConfig,
        probe: Arc<dyn ReadinessProbe>,
        snapshots: Arc<dyn SnapshotSource>,
        uploader: Arc<dyn SnapshotUploader>,
    ) -> Self {
        Self {
            config,
            probe,
            snapshots,
            uploader,
        }
    }

    /// Pipeline with reqwest-backed probe and uploader at default settings.
    pub fn over_http(config: PipelineConfig, snapshots: Arc<dyn SnapshotSource>) -> Self {
        Self::new(
            config,
            Arc::new(HttpReadinessProbe::new(ProbeSettings::default())),
            snapshots,
            Arc::new(HttpSnapshotUploader::new(UploadSettings::default())),
        )
    }

    /// Runs one probe → capture → upload cycle.
    ///
    /// Each stage is fault-isolated and nothing is retried; a new trigger
    /// is required to attempt again. Capture never runs unless the probe
    /// answered ready.
    pub async fn run(&self, request: &CaptureRequest) -> PipelineResult {
        let endpoint = self.effective_endpoint();

        match self.probe.probe(&endpoint).await {
            ReadySignal::NotReady => return PipelineResult::NotReady,
            ReadySignal::Ready => {}
        }

        let blob = match self.snapshots.capture(request.tab_id).await {
            Ok(bytes) if bytes.is_empty() => {
                courier_warn!("snapshot engine returned no data for tab {}", request.tab_id);
                return PipelineResult::CaptureFailed;
            }
            Ok(bytes) => bytes,
            Err(err) => {
                courier_warn!("capture failed for tab {}: {err}", request.tab_id);
                return PipelineResult::CaptureFailed;
            }
        };
        courier_info!("captured {} bytes from {}", blob.len(), request.page_url);

        match self.uploader.upload(&endpoint, blob).await {
            Ok(status) => {
                courier_info!("upload accepted by {endpoint} with status {status}");
                PipelineResult::Success
            }
            Err(UploadError::Rejected { status }) => {
                courier_warn!("upload rejected by {endpoint} with status {status}");
                PipelineResult::UploadFailed { status }
            }
            Err(UploadError::Transport(message)) => {
                courier_warn!("upload transport failure for {endpoint}: {message}");
                PipelineResult::UploadFailed { status: 0 }
            }
        }
    }

    /// Stored override when present and non-empty, else the built-in
    /// default. An override that does not parse is logged and ignored.
    fn effective_endpoint(&self) -> Url {
        if let Some(raw) = (self.config.endpoint_override)() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                match Url::parse(trimmed) {
                    Ok(url) => return url,
                    Err(err) => {
                        courier_warn!("ignoring invalid endpoint override {trimmed:?}: {err}");
                    }
                }
            }
        }
        self.config.default_endpoint.clone()
    }
}
