use std::fs;
use std::io::Write;
use std::path::PathBuf;

use courier_core::{CaptureConfig, DEFAULT_ENDPOINT_URL};
use courier_logging::{courier_error, courier_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

const CONFIG_FILENAME: &str = "courier_config.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedConfig {
    server_url: Option<String>,
    status: bool,
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            status: true,
        }
    }
}

/// Key-value config store backed by a RON file in the data directory.
///
/// Reads tolerate a missing or corrupt file by falling back to defaults;
/// writes replace the file atomically (temp file, then rename).
pub struct StatusStore {
    data_dir: PathBuf,
}

impl StatusStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Enabled flag; true when never written.
    pub fn status(&self) -> bool {
        self.load().status
    }

    pub fn set_status(&self, enabled: bool) {
        let mut config = self.load();
        config.status = enabled;
        self.save(&config);
    }

    /// Stored endpoint override, `None` when unset.
    pub fn server_url(&self) -> Option<String> {
        self.load().server_url
    }

    pub fn set_server_url(&self, value: Option<String>) {
        let mut config = self.load();
        config.server_url = value;
        self.save(&config);
    }

    /// Capture configuration as currently persisted, with the endpoint
    /// already resolved against the built-in default.
    pub fn capture_config(&self, watch_suffixes: &[String]) -> CaptureConfig {
        let persisted = self.load();
        CaptureConfig {
            endpoint_url: persisted
                .server_url
                .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string()),
            watch_suffixes: watch_suffixes.to_vec(),
            enabled: persisted.status,
        }
    }

    fn path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }

    fn load(&self) -> PersistedConfig {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return PersistedConfig::default();
            }
            Err(err) => {
                courier_warn!("Failed to read config from {:?}: {}", path, err);
                return PersistedConfig::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                courier_warn!("Failed to parse config from {:?}: {}", path, err);
                PersistedConfig::default()
            }
        }
    }

    fn save(&self, config: &PersistedConfig) {
        if let Err(err) = fs::create_dir_all(&self.data_dir) {
            courier_error!("Failed to create data dir {:?}: {}", self.data_dir, err);
            return;
        }

        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(config, pretty) {
            Ok(text) => text,
            Err(err) => {
                courier_error!("Failed to serialize config: {}", err);
                return;
            }
        };

        if let Err(err) = self.replace_file(&content) {
            courier_error!("Failed to write config to {:?}: {}", self.path(), err);
        }
    }

    fn replace_file(&self, content: &str) -> std::io::Result<()> {
        let target = self.path();
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace any existing file so a reload sees one config or the other.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}
