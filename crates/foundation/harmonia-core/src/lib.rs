//! # Harmonia Core
//!
//! Foundation types for harmonic resonance analysis.
//!
//! ```text
//!   CHART ──► POINTS ──► ARC ──► ARC IN HARMONIC h ──► CLEARANCE vs ORB/h
//!     │                                                     │
//!     └── ChartObject (1..N charts)                         └── STRENGTH, DEPTH
//! ```
//!
//! Everything here is a pure function of its inputs. The analysis
//! configuration is an immutable value handed to every computation.

pub mod chart;
pub mod config;
pub mod format;
pub mod harmonics;
pub mod zodiac;

pub use chart::{Chart, ChartHandle, ChartId, ChartObject, MultiChart, Point};
pub use config::AnalysisConfig;
pub use format::{format_degrees, format_degrees_table, DegreeParts};
pub use harmonics::{
    arc, arc_in_harmonic, calculate_strength, find_multiplicity, format_multipliers,
    normalize_coordinate, prime_factors, Harmonic, CIRCLE, HALF_CIRCLE,
};
pub use zodiac::ZodiacSign;

/// Result type for harmonia operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the harmonia analysis crates
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}
