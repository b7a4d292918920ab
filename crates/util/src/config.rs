//! Sidebar configuration for the kdocs CLI and TUI.
//!
//! A small JSON file (`~/.config/kdocs/sidebar.json` on most platforms, or
//! the path in `KDOCS_CONFIG_PATH`) selects the navigation file and the row
//! metrics. A missing file yields defaults; an unreadable one is logged and
//! also yields defaults so the sidebar always renders.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use kdocs_nav::{EnvRootFontSize, FixedRootFontSize, LayoutMetrics, RemMetrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "KDOCS_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "sidebar.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Navigation tree to load instead of the built-in one (JSON or YAML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_path: Option<PathBuf>,
    /// Fixed root font size. When unset the size is read from
    /// `KDOCS_ROOT_FONT_SIZE` on every resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_font_size_px: Option<f64>,
    pub metrics: RemMetrics,
}

impl SidebarConfig {
    /// Loads the config from [`default_config_path`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<SidebarConfig>(&data) {
                Ok(mut config) => {
                    config.navigation_path = config
                        .navigation_path
                        .map(|nav_path| expand_tilde(&nav_path.to_string_lossy()));
                    Ok(config)
                }
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse sidebar config; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Io(error)),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Pixel metrics for the next resolution. The root font size is read
    /// now, not cached.
    pub fn layout_metrics(&self) -> LayoutMetrics {
        match self.root_font_size_px {
            Some(size) => LayoutMetrics::from_rem(&self.metrics, &FixedRootFontSize(size)),
            None => LayoutMetrics::from_rem(&self.metrics, &EnvRootFontSize),
        }
    }
}

/// Path of the sidebar configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kdocs")
        .join(CONFIG_FILE_NAME)
}
