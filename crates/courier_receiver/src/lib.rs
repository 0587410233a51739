//! Courier receiver: the backend side of the snapshot handshake.
//!
//! Answers the readiness probe with 202 only while a target file name is
//! staged, consumes the staged name exactly once per upload, and writes
//! the PUT body to disk.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::routing::get;
use axum::Router;
use courier_logging::{courier_error, courier_info};
use tokio::sync::mpsc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Upper bound for uploaded archive bodies.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Shared receiver state: the staged file name and where bodies land.
pub struct ReceiverState {
    staged: Mutex<Option<String>>,
    output_dir: PathBuf,
    saved_tx: mpsc::UnboundedSender<PathBuf>,
}

impl ReceiverState {
    /// Creates the state plus the channel that reports each saved file.
    pub fn new(output_dir: impl Into<PathBuf>) -> (Arc<Self>, mpsc::UnboundedReceiver<PathBuf>) {
        let (saved_tx, saved_rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                staged: Mutex::new(None),
                output_dir: output_dir.into(),
                saved_tx,
            }),
            saved_rx,
        )
    }

    /// Stages the next upload under `name` (archive suffix appended when
    /// missing), replacing any previously staged name.
    pub fn stage(&self, name: &str) -> String {
        let name = normalize_snapshot_name(name);
        *self.staged.lock().expect("staged lock") = Some(name.clone());
        name
    }

    pub fn is_staged(&self) -> bool {
        self.staged.lock().expect("staged lock").is_some()
    }

    fn take_staged(&self) -> Option<String> {
        self.staged.lock().expect("staged lock").take()
    }
}

/// Appends the archive suffix unless already present.
pub fn normalize_snapshot_name(name: &str) -> String {
    if name.ends_with(".mhtml") {
        name.to_string()
    } else {
        format!("{name}.mhtml")
    }
}

pub fn build_router(state: Arc<ReceiverState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/snapshots", get(probe).put(ingest))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// GET side of the handshake: 202 invites an upload, 200 reports idle.
async fn probe(State(state): State<Arc<ReceiverState>>) -> StatusCode {
    if state.is_staged() {
        StatusCode::ACCEPTED
    } else {
        courier_info!("probe before a file name is staged");
        StatusCode::OK
    }
}

/// PUT side: consumes the staged name exactly once and writes the body.
async fn ingest(State(state): State<Arc<ReceiverState>>, body: Bytes) -> StatusCode {
    let name = match state.take_staged() {
        Some(name) => name,
        None => return StatusCode::NOT_MODIFIED,
    };

    let path = state.output_dir.join(&name);
    if let Err(err) = tokio::fs::write(&path, &body).await {
        courier_error!("Failed to save {:?}: {}", path, err);
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    courier_info!("Saved {} bytes to {:?}", body.len(), path);
    let _ = state.saved_tx.send(path);
    StatusCode::OK
}
