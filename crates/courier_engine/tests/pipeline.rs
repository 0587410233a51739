use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier_engine::{
    CaptureError, CapturePipeline, CaptureRequest, EngineEvent, EngineHandle, PipelineConfig,
    PipelineResult, ReadinessProbe, ReadySignal, SnapshotSource, SnapshotUploader, TabId,
    UploadError,
};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct StubProbe {
    signal: ReadySignal,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubProbe {
    fn new(signal: ReadySignal) -> Arc<Self> {
        Arc::new(Self {
            signal,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl ReadinessProbe for StubProbe {
    async fn probe(&self, endpoint: &Url) -> ReadySignal {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(endpoint.to_string());
        self.signal
    }
}

enum SnapshotMode {
    Blob(Vec<u8>),
    Fail,
}

struct StubSnapshots {
    mode: SnapshotMode,
    calls: AtomicUsize,
}

impl StubSnapshots {
    fn blob(bytes: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            mode: SnapshotMode::Blob(bytes),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            mode: SnapshotMode::Fail,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl SnapshotSource for StubSnapshots {
    async fn capture(&self, _tab_id: TabId) -> Result<Vec<u8>, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            SnapshotMode::Blob(bytes) => Ok(bytes.clone()),
            SnapshotMode::Fail => Err(CaptureError::Unavailable("stub".to_string())),
        }
    }
}

enum UploadMode {
    Accept(u16),
    Reject(u16),
    Transport,
}

struct StubUploader {
    mode: UploadMode,
    calls: AtomicUsize,
    last_len: AtomicUsize,
}

impl StubUploader {
    fn new(mode: UploadMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: AtomicUsize::new(0),
            last_len: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl SnapshotUploader for StubUploader {
    async fn upload(&self, _endpoint: &Url, blob: Vec<u8>) -> Result<u16, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_len.store(blob.len(), Ordering::SeqCst);
        match self.mode {
            UploadMode::Accept(status) => Ok(status),
            UploadMode::Reject(status) => Err(UploadError::Rejected { status }),
            UploadMode::Transport => Err(UploadError::Transport("stub".to_string())),
        }
    }
}

fn default_config() -> PipelineConfig {
    PipelineConfig::fixed(Url::parse("http://127.0.0.1:9/snapshots").expect("default url"))
}

fn request() -> CaptureRequest {
    CaptureRequest {
        tab_id: 7,
        page_url: "https://news.example.com/feed".to_string(),
    }
}

#[tokio::test]
async fn not_ready_probe_runs_no_capture_or_upload() {
    let probe = StubProbe::new(ReadySignal::NotReady);
    let snapshots = StubSnapshots::blob(vec![1u8; 500]);
    let uploader = StubUploader::new(UploadMode::Accept(200));
    let pipeline = CapturePipeline::new(
        default_config(),
        probe.clone(),
        snapshots.clone(),
        uploader.clone(),
    );

    let result = pipeline.run(&request()).await;

    assert_eq!(result, PipelineResult::NotReady);
    assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    assert_eq!(snapshots.calls.load(Ordering::SeqCst), 0);
    assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ready_cycle_captures_and_uploads_exactly_once() {
    let probe = StubProbe::new(ReadySignal::Ready);
    let snapshots = StubSnapshots::blob(vec![1u8; 500]);
    let uploader = StubUploader::new(UploadMode::Accept(200));
    let pipeline = CapturePipeline::new(
        default_config(),
        probe.clone(),
        snapshots.clone(),
        uploader.clone(),
    );

    let result = pipeline.run(&request()).await;

    assert_eq!(result, PipelineResult::Success);
    assert_eq!(snapshots.calls.load(Ordering::SeqCst), 1);
    assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
    assert_eq!(uploader.last_len.load(Ordering::SeqCst), 500);
}

#[tokio::test]
async fn empty_snapshot_aborts_before_upload() {
    let probe = StubProbe::new(ReadySignal::Ready);
    let snapshots = StubSnapshots::blob(Vec::new());
    let uploader = StubUploader::new(UploadMode::Accept(200));
    let pipeline = CapturePipeline::new(
        default_config(),
        probe.clone(),
        snapshots.clone(),
        uploader.clone(),
    );

    let result = pipeline.run(&request()).await;

    assert_eq!(result, PipelineResult::CaptureFailed);
    assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_snapshot_aborts_before_upload() {
    let probe = StubProbe::new(ReadySignal::Ready);
    let snapshots = StubSnapshots::failing();
    let uploader = StubUploader::new(UploadMode::Accept(200));
    let pipeline = CapturePipeline::new(
        default_config(),
        probe.clone(),
        snapshots.clone(),
        uploader.clone(),
    );

    let result = pipeline.run(&request()).await;

    assert_eq!(result, PipelineResult::CaptureFailed);
    assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_upload_reports_response_status() {
    let probe = StubProbe::new(ReadySignal::Ready);
    let snapshots = StubSnapshots::blob(b"page".to_vec());
    let uploader = StubUploader::new(UploadMode::Reject(503));
    let pipeline = CapturePipeline::new(default_config(), probe, snapshots, uploader);

    let result = pipeline.run(&request()).await;

    assert_eq!(result, PipelineResult::UploadFailed { status: 503 });
}

#[tokio::test]
async fn upload_transport_failure_uses_zero_sentinel() {
    let probe = StubProbe::new(ReadySignal::Ready);
    let snapshots = StubSnapshots::blob(b"page".to_vec());
    let uploader = StubUploader::new(UploadMode::Transport);
    let pipeline = CapturePipeline::new(default_config(), probe, snapshots, uploader);

    let result = pipeline.run(&request()).await;

    assert_eq!(result, PipelineResult::UploadFailed { status: 0 });
}

#[tokio::test]
async fn stored_override_endpoint_wins_over_default() {
    let probe = StubProbe::new(ReadySignal::NotReady);
    let config = PipelineConfig {
        default_endpoint: Url::parse("http://127.0.0.1:9/snapshots").expect("default url"),
        endpoint_override: Arc::new(|| Some("http://10.0.0.2:4000/inbox".to_string())),
    };
    let pipeline = CapturePipeline::new(
        config,
        probe.clone(),
        StubSnapshots::blob(b"page".to_vec()),
        StubUploader::new(UploadMode::Accept(200)),
    );

    pipeline.run(&request()).await;

    let seen = probe.seen.lock().unwrap();
    assert_eq!(seen.as_slice(), ["http://10.0.0.2:4000/inbox"]);
}

#[tokio::test]
async fn blank_or_invalid_override_falls_back_to_default() {
    for raw in ["", "   ", "not a url"] {
        let probe = StubProbe::new(ReadySignal::NotReady);
        let config = PipelineConfig {
            default_endpoint: Url::parse("http://127.0.0.1:9/snapshots").expect("default url"),
            endpoint_override: Arc::new(move || Some(raw.to_string())),
        };
        let pipeline = CapturePipeline::new(
            config,
            probe.clone(),
            StubSnapshots::blob(b"page".to_vec()),
            StubUploader::new(UploadMode::Accept(200)),
        );

        pipeline.run(&request()).await;

        let seen = probe.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["http://127.0.0.1:9/snapshots"]);
    }
}

#[tokio::test]
async fn full_cycle_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/snapshots"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/snapshots"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let blob = b"<html>archived</html>".to_vec();
    let config = PipelineConfig::fixed(
        Url::parse(&format!("{}/snapshots", server.uri())).expect("mock url"),
    );
    let pipeline = CapturePipeline::over_http(config, StubSnapshots::blob(blob.clone()));

    let result = pipeline.run(&request()).await;
    assert_eq!(result, PipelineResult::Success);

    let requests = server.received_requests().await.expect("recorded requests");
    let puts: Vec<_> = requests.iter().filter(|r| r.method.as_str() == "PUT").collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body, blob);
}

#[test]
fn engine_handle_reports_cycle_completion() {
    let pipeline = CapturePipeline::new(
        default_config(),
        StubProbe::new(ReadySignal::NotReady),
        StubSnapshots::blob(b"page".to_vec()),
        StubUploader::new(UploadMode::Accept(200)),
    );
    let (engine, events) = EngineHandle::new(pipeline);

    engine.run_cycle(request());

    let event = events
        .recv_timeout(Duration::from_secs(5))
        .expect("cycle event");
    assert_eq!(
        event,
        EngineEvent::CycleFinished {
            request: request(),
            result: PipelineResult::NotReady,
        }
    );
}
