//! Settings persistence
//!
//! Stores the three analysis scalars as YAML. A missing file is not an
//! error: the defaults apply until something is saved.

use crate::Result;
use harmonia_core::config::{DEFAULT_EDGE_HARMONIC, DEFAULT_ORBS_DIVISOR};
use harmonia_core::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-editable analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Highest harmonic examined
    pub edge_harmonic: u32,

    /// Circle divisor giving the primal orb (30 → 12°)
    pub orbs_divisor: u32,

    /// Halve the orb for pairs spanning two charts
    pub half_orbs_for_doubles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edge_harmonic: DEFAULT_EDGE_HARMONIC,
            orbs_divisor: DEFAULT_ORBS_DIVISOR,
            half_orbs_for_doubles: true,
        }
    }
}

impl Settings {
    /// Parse settings from YAML text. Absent keys take their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Primal orb in degrees
    pub fn primal_orb(&self) -> f64 {
        harmonia_core::CIRCLE / f64::from(self.orbs_divisor.max(1))
    }

    /// Validated snapshot for one analysis
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        Ok(AnalysisConfig::from_divisor(
            self.orbs_divisor,
            self.edge_harmonic,
            self.half_orbs_for_doubles,
        )?)
    }
}

/// Settings file location and operations
pub struct SettingsStore {
    /// Path to settings file
    path: PathBuf,
}

impl SettingsStore {
    /// Create storage at default location (~/.config/harmonia/settings.yaml)
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("harmonia");

        std::fs::create_dir_all(&config_dir)?;

        Ok(Self {
            path: config_dir.join("settings.yaml"),
        })
    }

    /// Create storage at specific path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the storage path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a settings file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings from disk, falling back to defaults when absent
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let settings = Settings::from_yaml_str(&content)?;
        tracing::info!(
            edge_harmonic = settings.edge_harmonic,
            orbs_divisor = settings.orbs_divisor,
            half_orbs_for_doubles = settings.half_orbs_for_doubles,
            "Loaded settings from {}",
            self.path.display()
        );

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let content = settings.to_yaml_string()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write to temp file first, then rename (atomic)
        let temp_path = self.path.with_extension("yaml.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &self.path)?;

        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
