//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::view::{ViewMode, ViewState};

/// Top-level application configuration.
///
/// All fields have sensible defaults so Orbit works without a config file.
/// Call [`Config::load`] to read from a TOML path, or
/// [`Config::load_or_default`] when a missing file is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Initial view state described by the `[view]` section.
    pub fn view_state(&self) -> ViewState {
        ViewState::new(self.view.mode, self.view.item_size, self.view.gap)
    }
}

/// General file-browsing preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    /// Directory to open at startup instead of the home directory.
    #[serde(default)]
    pub start_dir: Option<String>,
}

/// Listing layout preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default = "default_item_size")]
    pub item_size: u32,
    #[serde(default = "default_gap")]
    pub gap: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            item_size: default_item_size(),
            gap: default_gap(),
        }
    }
}

/// Directory fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Seconds before a directory fetch is reported as failed. `0` waits forever.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LoadingConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where saved locations are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub locations_file: Option<PathBuf>,
}

/// Log output settings for frontends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_item_size() -> u32 {
    80
}

fn default_gap() -> u32 {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
