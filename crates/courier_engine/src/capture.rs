use crate::{CaptureError, TabId};

/// External page-rendering engine that serializes a live tab into a
/// single-file archival blob. Implemented by the host integration; the
/// pipeline only sees the bytes.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn capture(&self, tab_id: TabId) -> Result<Vec<u8>, CaptureError>;
}
