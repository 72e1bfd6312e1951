//! # Harmonia Resonance
//!
//! Pairwise resonance analysis and harmonic pattern extraction.
//!
//! ```text
//!   ChartObject
//!       │ flatten (chart order, then point order)
//!       ▼
//!   ┌──────────────────────────────┐
//!   │ ResonanceMatrix              │   one ResonanceBatch per pair i<j,
//!   │   i\j  0   1   2   3         │   packed upper triangle
//!   │    0   ·   ■   ■   ■         │
//!   │    1       ·   ■   ■         │   ResonanceBatch ─► [Aspect h, m, clearance]
//!   │    2           ·   ■         │
//!   └──────────────────────────────┘
//!       │ find_patterns(h)
//!       ▼
//!   Pattern { members, clearance sums, charts }
//! ```

pub mod aspect;
pub mod batch;
pub mod finder;
pub mod interpret;
pub mod matrix;
pub mod pattern;

pub use aspect::Aspect;
pub use batch::ResonanceBatch;
pub use interpret::aspect_name;
pub use matrix::ResonanceMatrix;
pub use pattern::{Pattern, PatternMember};

pub use harmonia_core::{Error, Result};
