use std::time::Duration;

use url::Url;

/// Built-in upload endpoint used when no override is stored.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3000/snapshots";

/// Reserved name of the single periodic capture timer.
pub const CAPTURE_TIMER_NAME: &str = "periodic-page-capture";

/// Period of the capture timer. The first fire is immediate.
pub const CAPTURE_PERIOD: Duration = Duration::from_secs(30);

/// Read-only capture configuration, owned by the config store and handed
/// to the state machine on every reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Effective upload endpoint (stored override or the built-in default).
    pub endpoint_url: String,
    /// Host suffixes whose tabs are monitored automatically.
    pub watch_suffixes: Vec<String>,
    /// Whether the feature is switched on.
    pub enabled: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            watch_suffixes: Vec::new(),
            enabled: true,
        }
    }
}

/// Outcome of matching a tab URL against the watch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMatch {
    /// The URL is unparseable or has no host (internal host pages).
    NoHost,
    /// The host ends with one of the watch suffixes.
    Watched,
    /// A regular web host outside the watch list.
    Unwatched,
}

/// Matches a raw tab URL against the configured host suffixes.
pub fn match_tab_url(raw: &str, suffixes: &[String]) -> TabMatch {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return TabMatch::NoHost,
    };
    let host = match parsed.host_str() {
        Some(host) => host,
        None => return TabMatch::NoHost,
    };
    if suffixes.iter().any(|suffix| host.ends_with(suffix.as_str())) {
        TabMatch::Watched
    } else {
        TabMatch::Unwatched
    }
}
