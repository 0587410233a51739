use std::time::Duration;

use courier_logging::{courier_debug, courier_warn};
use url::Url;

use crate::ReadySignal;

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Asks the backend whether it currently wants an upload.
///
/// The probe is a backpressure gate: the remote side decides whether an
/// upload is even attempted, so no capture work runs speculatively.
#[async_trait::async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Never fails past this boundary; every status or transport problem
    /// is folded into [`ReadySignal::NotReady`].
    async fn probe(&self, endpoint: &Url) -> ReadySignal;
}

#[derive(Debug, Clone)]
pub struct HttpReadinessProbe {
    settings: ProbeSettings,
}

impl HttpReadinessProbe {
    pub fn new(settings: ProbeSettings) -> Self {
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
impl ReadinessProbe for HttpReadinessProbe {
    async fn probe(&self, endpoint: &Url) -> ReadySignal {
        let client = match self.build_client() {
            Ok(client) => client,
            Err(err) => {
                courier_warn!("probe client setup failed: {err}");
                return ReadySignal::NotReady;
            }
        };

        let response = match client.get(endpoint.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                courier_warn!("probe transport failure for {endpoint}: {err}");
                return ReadySignal::NotReady;
            }
        };

        if response.status() == reqwest::StatusCode::ACCEPTED {
            ReadySignal::Ready
        } else {
            // Expected steady state while no consumer is waiting.
            courier_debug!(
                "probe answered {} for {endpoint}, not ready",
                response.status()
            );
            ReadySignal::NotReady
        }
    }
}
