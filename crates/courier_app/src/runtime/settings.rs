use courier_core::DEFAULT_ENDPOINT_URL;
use courier_logging::{courier_info, courier_warn};
use url::Url;

use super::store::StatusStore;

/// Applies the settings-form rule for the server URL field: an empty
/// value or the built-in default clears the override, any other
/// non-empty value becomes the override.
pub fn apply_server_url(store: &StatusStore, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == DEFAULT_ENDPOINT_URL {
        store.set_server_url(None);
        courier_info!("endpoint override cleared");
        return;
    }

    if Url::parse(trimmed).is_err() {
        // Persisted verbatim; the pipeline falls back to the default at
        // use time when the override does not parse.
        courier_warn!("saving endpoint override that does not parse: {trimmed:?}");
    }
    store.set_server_url(Some(trimmed.to_string()));
    courier_info!("endpoint override set to {trimmed}");
}
