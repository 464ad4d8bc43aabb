//! Application settings and paths.
//!
//! Settings live in `<config_dir>/settings.json` (XDG on Linux). The file is
//! optional; every field falls back to its default when absent.

use crate::config::ScanConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::types::PortSpec;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/netscan)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the platform directories. Nothing is created on disk.
    pub fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("", "", "netscan").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// User-level defaults for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Port specification used when none is given on the command line.
    pub default_ports: String,
    /// Default timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Default worker pool size, 0 for one worker per target.
    pub default_concurrency: usize,
    /// Emit CSV instead of the table by default.
    pub csv: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_ports: PortSpec::DEFAULT.to_string(),
            default_timeout_ms: ScanConfig::DEFAULT_TIMEOUT.as_millis() as u64,
            default_concurrency: ScanConfig::DEFAULT_CONCURRENCY,
            csv: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if there is no file.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::new()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file, which must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}
