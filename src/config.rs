//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    services::sync_service::DEFAULT_POLL_INTERVAL,
    state::{DEFAULT_QUESTION_POINTS, GameSettings},
};

/// Default location on disk where the binary looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/gameshow.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GAMESHOW_CONFIG_PATH";
/// Directory used by the file store when none is configured.
const DEFAULT_STORE_DIR: &str = "data";
/// Lower bound applied to the configured poll interval.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration.
pub struct AppConfig {
    store_dir: PathBuf,
    poll_interval: Duration,
    default_points: u32,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        store_dir = %app_config.store_dir.display(),
                        poll_interval_ms = app_config.poll_interval.as_millis() as u64,
                        "loaded gameshow config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document; omitted fields keep their defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Directory holding the file-backed key-value store.
    pub fn store_dir(&self) -> &PathBuf {
        &self.store_dir
    }

    /// Delay between two sync monitor checks.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Settings handed to the gameshow services.
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            default_points: self.default_points,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_points: DEFAULT_QUESTION_POINTS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    store_dir: Option<PathBuf>,
    poll_interval_ms: Option<u64>,
    default_points: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            store_dir: value.store_dir.unwrap_or(defaults.store_dir),
            poll_interval: value
                .poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval)
                .max(MIN_POLL_INTERVAL),
            default_points: value
                .default_points
                .unwrap_or(defaults.default_points)
                .max(1),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = AppConfig::from_json(
            r#"{"storeDir": "/var/lib/gameshow", "pollIntervalMs": 2000, "defaultPoints": 50}"#,
        )
        .unwrap();
        assert_eq!(config.store_dir(), &PathBuf::from("/var/lib/gameshow"));
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.settings().default_points, 50);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AppConfig::from_json(r#"{"pollIntervalMs": 0, "defaultPoints": 0}"#).unwrap();
        assert_eq!(config.poll_interval(), MIN_POLL_INTERVAL);
        assert_eq!(config.settings().default_points, 1);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::from_json("[1, 2]").is_err());
    }
}
