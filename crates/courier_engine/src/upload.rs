use std::time::Duration;

use url::Url;

use crate::UploadError;

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Delivers an archival blob to the backend endpoint.
#[async_trait::async_trait]
pub trait SnapshotUploader: Send + Sync {
    /// Returns the 2xx status code on success.
    async fn upload(&self, endpoint: &Url, blob: Vec<u8>) -> Result<u16, UploadError>;
}

#[derive(Debug, Clone)]
pub struct HttpSnapshotUploader {
    settings: UploadSettings,
}

impl HttpSnapshotUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
    }
}

#[async_trait::async_trait]
impl SnapshotUploader for HttpSnapshotUploader {
    async fn upload(&self, endpoint: &Url, blob: Vec<u8>) -> Result<u16, UploadError> {
        let client = self
            .build_client()
            .map_err(|err| UploadError::Transport(err.to_string()))?;

        let response = client
            .put(endpoint.clone())
            .body(blob)
            .send()
            .await
            .map_err(|err| UploadError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(UploadError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
