//! Runtime configuration.
//!
//! Loaded from `config.json` next to the executable (or an explicit path),
//! with every field defaulted so a missing or partial file still yields a
//! working setup. CLI flags override individual fields after loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Complete detector configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Camera device index.
    #[serde(default = "default_camera_index")]
    pub camera_index: i32,
    /// Requested capture width in pixels.
    #[serde(default = "default_display_width")]
    pub display_width: u32,
    /// Requested capture height in pixels.
    #[serde(default = "default_display_height")]
    pub display_height: u32,
    /// Milliseconds between detection scans.
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,
    /// Seconds a detection stays live without being re-seen.
    #[serde(default = "default_detection_timeout_secs")]
    pub detection_timeout_secs: u64,
    /// Confidence stored on pipeline detections (fixed; the engine exposes
    /// no per-result score).
    #[serde(default = "default_scan_confidence")]
    pub scan_confidence: u8,
    /// HTTP bind address.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Database file; defaults to the platform data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

fn default_camera_index() -> i32 {
    0
}

fn default_display_width() -> u32 {
    640
}

fn default_display_height() -> u32 {
    480
}

fn default_scan_interval_ms() -> u64 {
    1000
}

fn default_detection_timeout_secs() -> u64 {
    15
}

fn default_scan_confidence() -> u8 {
    50
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            camera_index: default_camera_index(),
            display_width: default_display_width(),
            display_height: default_display_height(),
            scan_interval_ms: default_scan_interval_ms(),
            detection_timeout_secs: default_detection_timeout_secs(),
            scan_confidence: default_scan_confidence(),
            bind_addr: default_bind_addr(),
            db_path: None,
        }
    }
}

impl DetectorConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn detection_timeout(&self) -> Duration {
        Duration::from_secs(self.detection_timeout_secs)
    }
}

/// Loads configuration from `path`, or from `config.json` next to the
/// executable when no path is given. Falls back to defaults on a missing or
/// unparseable file.
pub fn load_config(path: Option<&Path>) -> DetectorConfig {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(|| {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("config.json")))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    });

    if config_path.exists() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    info!(path = %config_path.display(), "config loaded");
                    return config;
                }
                Err(error) => {
                    warn!(%error, path = %config_path.display(), "failed to parse config, using defaults");
                }
            },
            Err(error) => {
                warn!(%error, path = %config_path.display(), "failed to read config, using defaults");
            }
        }
    } else {
        info!(path = %config_path.display(), "no config file, using defaults");
    }

    DetectorConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.camera_index, 0);
        assert_eq!(config.scan_interval(), Duration::from_secs(1));
        assert_eq!(config.detection_timeout(), Duration::from_secs(15));
        assert_eq!(config.scan_confidence, 50);
        assert_eq!(config.bind_addr, "127.0.0.1:5000");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_partial_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"camera_index": 2, "scan_interval_ms": 500}}"#).unwrap();

        let config = load_config(Some(&path));
        assert_eq!(config.camera_index, 2);
        assert_eq!(config.scan_interval(), Duration::from_millis(500));
        // Unspecified fields keep their defaults.
        assert_eq!(config.detection_timeout_secs, 15);
        assert_eq!(config.display_width, 640);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = load_config(Some(&path));
        assert_eq!(config.camera_index, 0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(config.bind_addr, "127.0.0.1:5000");
    }
}
