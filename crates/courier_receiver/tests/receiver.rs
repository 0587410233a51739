use std::fs;
use std::sync::Arc;
use std::time::Duration;

use courier_receiver::{build_router, normalize_snapshot_name, ReceiverState};
use tempfile::TempDir;

async fn serve(state: Arc<ReceiverState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/snapshots")
}

#[tokio::test]
async fn probe_answers_ok_while_idle_and_accepted_while_staged() {
    let dir = TempDir::new().expect("temp dir");
    let (state, _saved_rx) = ReceiverState::new(dir.path());
    let endpoint = serve(state.clone()).await;
    let client = reqwest::Client::new();

    let response = client.get(&endpoint).send().await.expect("probe");
    assert_eq!(response.status().as_u16(), 200);

    state.stage("pending");
    let response = client.get(&endpoint).send().await.expect("probe");
    assert_eq!(response.status().as_u16(), 202);

    // Probing does not consume the staged name.
    let response = client.get(&endpoint).send().await.expect("probe");
    assert_eq!(response.status().as_u16(), 202);
}

#[tokio::test]
async fn upload_without_staged_name_is_not_modified() {
    let dir = TempDir::new().expect("temp dir");
    let (state, _saved_rx) = ReceiverState::new(dir.path());
    let endpoint = serve(state).await;

    let response = reqwest::Client::new()
        .put(&endpoint)
        .body(b"orphan".to_vec())
        .send()
        .await
        .expect("put");
    assert_eq!(response.status().as_u16(), 304);
}

#[tokio::test]
async fn staged_upload_is_written_and_consumed_exactly_once() {
    let dir = TempDir::new().expect("temp dir");
    let (state, mut saved_rx) = ReceiverState::new(dir.path());
    let endpoint = serve(state.clone()).await;
    let client = reqwest::Client::new();

    state.stage("capture");
    let body = b"snapshot-bytes".to_vec();
    let response = client
        .put(&endpoint)
        .body(body.clone())
        .send()
        .await
        .expect("put");
    assert_eq!(response.status().as_u16(), 200);

    let saved = tokio::time::timeout(Duration::from_secs(1), saved_rx.recv())
        .await
        .expect("saved signal")
        .expect("saved path");
    assert_eq!(saved, dir.path().join("capture.mhtml"));
    assert_eq!(fs::read(&saved).expect("read saved"), body);

    // The staged name is gone: probe reports idle, a second upload is
    // rejected.
    let response = client.get(&endpoint).send().await.expect("probe");
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .put(&endpoint)
        .body(b"again".to_vec())
        .send()
        .await
        .expect("put");
    assert_eq!(response.status().as_u16(), 304);
}

#[tokio::test]
async fn restaging_replaces_the_previous_name() {
    let dir = TempDir::new().expect("temp dir");
    let (state, _saved_rx) = ReceiverState::new(dir.path());
    let endpoint = serve(state.clone()).await;

    state.stage("first");
    state.stage("second");

    let response = reqwest::Client::new()
        .put(&endpoint)
        .body(b"body".to_vec())
        .send()
        .await
        .expect("put");
    assert_eq!(response.status().as_u16(), 200);

    assert!(dir.path().join("second.mhtml").exists());
    assert!(!dir.path().join("first.mhtml").exists());
}

#[test]
fn archive_suffix_is_appended_once() {
    assert_eq!(normalize_snapshot_name("notes"), "notes.mhtml");
    assert_eq!(normalize_snapshot_name("notes.mhtml"), "notes.mhtml");
}
