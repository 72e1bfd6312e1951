//! # Harmonia Config
//!
//! Settings storage for harmonic analyses. Settings live in a YAML file
//! (`~/.config/harmonia/settings.yaml` by default) and are turned into an
//! immutable [`AnalysisConfig`] at the start of each analysis.
//!
//! ```yaml
//! edge_harmonic: 108
//! orbs_divisor: 30
//! half_orbs_for_doubles: true
//! ```

mod settings;

pub use settings::{Settings, SettingsStore};

pub use harmonia_core::AnalysisConfig;

/// Result type for harmonia-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    FormatError(#[from] serde_yaml::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] harmonia_core::Error),
}
