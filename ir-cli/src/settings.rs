//! Application settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use ir_detect::DetectionConfig;
use ir_sim::DeviceProfile;
use ir_transmit::TransmitterConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str =
    "irblast=info,ir_protocol=info,ir_detect=info,ir_transmit=info,ir_sim=info";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Tracing filter directive
    pub log_level: String,
    /// How long to wait for an asynchronously connecting transmitter
    pub ready_timeout_ms: u64,
    /// Detection chain configuration
    pub detection: DetectionConfig,
    /// Transmitter configuration
    pub transmitter: TransmitterConfig,
    /// Simulated device to run against
    pub device: DeviceProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            ready_timeout_ms: 2000,
            detection: DetectionConfig::default(),
            transmitter: TransmitterConfig::default(),
            device: DeviceProfile::native(),
        }
    }
}

impl Settings {
    /// Get the XDG config directory for irblast
    /// Uses $XDG_CONFIG_HOME/irblast, falls back to ~/.config/irblast
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("irblast"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("irblast"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from `path`, or the default location
    ///
    /// A missing file gives defaults silently; an unreadable or invalid one
    /// gives defaults with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::settings_path) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// Save settings to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
