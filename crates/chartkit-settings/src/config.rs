//! Configuration and settings management for ChartKit
//!
//! Provides configuration file handling and validation for the drawing
//! interaction layer. Supports JSON and TOML file formats; the default
//! location is a platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Interaction settings (hit tolerance, drag threshold, hover grace, reselect policy)
//! - History settings (undo depth, delete snapshots)

use chartkit_core::constants::{
    DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_HISTORY_DEPTH, DEFAULT_HIT_TOLERANCE_PX,
    DEFAULT_HOVER_GRACE_MS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// When the dragged annotation is re-selected after a drag commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReselectPolicy {
    /// Re-select as part of the commit, before the next event is handled
    #[default]
    Immediate,
    /// Hold the reselect until the host signals it has observed the commit
    Deferred,
}

impl std::fmt::Display for ReselectPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Deferred => write!(f, "deferred"),
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Pointer proximity tolerance in screen pixels
    pub hit_tolerance_px: f64,
    /// Pointer travel (pixels) before a press becomes a drag
    pub drag_threshold_px: f64,
    /// Delay before a lost hover is cleared, in milliseconds
    pub hover_grace_ms: u64,
    /// Newly drawn annotations start out selected
    pub select_on_create: bool,
    /// Re-selection timing after a drag commit
    pub reselect_after_drag: ReselectPolicy,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            hover_grace_ms: DEFAULT_HOVER_GRACE_MS,
            select_on_create: true,
            reselect_after_drag: ReselectPolicy::Immediate,
        }
    }
}

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of retained snapshots
    pub max_depth: usize,
    /// Record a snapshot after a deletion
    pub snapshot_on_delete: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
            snapshot_on_delete: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interaction settings
    pub interaction: InteractionSettings,
    /// History settings
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config_dir>/chartkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        Ok(dir.join("chartkit").join("config.toml"))
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let tol = self.interaction.hit_tolerance_px;
        if !tol.is_finite() || tol < 0.0 {
            return Err(SettingsError::invalid(
                "interaction.hit_tolerance_px",
                "must be a finite, non-negative number",
            ));
        }

        let threshold = self.interaction.drag_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SettingsError::invalid(
                "interaction.drag_threshold_px",
                "must be a finite, non-negative number",
            ));
        }

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid(
                "history.max_depth",
                "must be > 0",
            ));
        }

        Ok(())
    }
}
