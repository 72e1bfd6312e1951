//! Aspect - one harmonic resonance found in an arc

use harmonia_core::{calculate_strength, find_multiplicity, format_degrees, prime_factors};
use serde::Serialize;
use std::fmt;

/// Clearances below this count as exact
const EXACT_CLEARANCE: f64 = 1e-9;

/// A harmonic resonance of one arc.
///
/// `clearance` is the raw distance in degrees from the nearest exact
/// multiple of `360/h`; the match tolerance in harmonic `h` is `orb/h`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    harmonic: u32,
    multiplicity: u32,
    clearance: f64,
    orb: f64,
    strength: f64,
    depth: u32,
}

impl Aspect {
    /// Measure an aspect of harmonic `h` for an arc with the given clearance.
    ///
    /// `orb` is the orb of the batch (already halved for cross-chart pairs).
    pub fn new(harmonic: u32, clearance: f64, arc: f64, orb: f64) -> Self {
        let harmonic = harmonic.max(1);
        let orb_here = orb / f64::from(harmonic);
        let depth = if clearance < EXACT_CLEARANCE {
            u32::MAX
        } else {
            (orb_here / clearance).floor().min(f64::from(u32::MAX)) as u32
        };

        Self {
            harmonic,
            multiplicity: find_multiplicity(harmonic, arc, orb),
            clearance,
            orb,
            strength: calculate_strength(orb_here, clearance),
            depth,
        }
    }

    pub fn harmonic(&self) -> u32 {
        self.harmonic
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// Distance from the exact aspect, in degrees
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Batch orb the aspect was measured with
    pub fn orb(&self) -> f64 {
        self.orb
    }

    /// Precision in percent, 100 for an exact aspect
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// How many multiples of this harmonic the aspect survives
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Clearance as seen in the harmonic's own chart, where the aspect
    /// becomes a conjunction
    pub fn harmonic_clearance(&self) -> f64 {
        self.clearance * f64::from(self.harmonic)
    }

    /// Prime multipliers of the harmonic, largest first
    pub fn multipliers(&self) -> Vec<u64> {
        prime_factors(i64::from(self.harmonic)).unwrap_or_default()
    }

    /// True if this aspect appears as a conjunction in harmonic `target`
    pub fn has_resonance(&self, target: u32) -> bool {
        target % self.harmonic == 0 && target / self.harmonic <= self.depth
    }

    /// Star rating by depth
    pub fn strength_rating(&self) -> &'static str {
        match self.depth {
            0..=1 => "★",
            2 => "★★",
            3..=5 => "★★★",
            6..=12 => "★★★★",
            13..=24 => "★★★★★",
            _ => "✰✰✰✰✰",
        }
    }

    /// Precision label by depth
    pub fn strength_level(&self) -> &'static str {
        match self.depth {
            0..=1 => "approximate",
            2 => "confident",
            3..=5 => "deep",
            6..=12 => "precise",
            13..=24 => "deeply precise",
            _ => "extremely precise",
        }
    }

    /// Strength weighted down for higher harmonics: `strength / sqrt(ln(h + 1))`
    pub fn weighted_strength(&self) -> f64 {
        self.strength / (f64::from(self.harmonic) + 1.0).ln().sqrt()
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = if self.depth == u32::MAX {
            "∞".to_string()
        } else {
            self.depth.to_string()
        };
        write!(
            f,
            "Resonance {} (x{}) - {} as {} ({:.2}%, {})",
            self.harmonic,
            self.multiplicity,
            self.strength_level(),
            depth,
            self.strength,
            format_degrees(self.clearance)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_square() {
        let aspect = Aspect::new(4, 0.0, 90.0, 12.0);
        assert_eq!(aspect.harmonic(), 4);
        assert_eq!(aspect.multiplicity(), 1);
        assert_eq!(aspect.strength(), 100.0);
        assert_eq!(aspect.depth(), u32::MAX);
        assert_eq!(aspect.strength_rating(), "✰✰✰✰✰");
        assert!(aspect.has_resonance(4));
        assert!(aspect.has_resonance(400));
        assert!(!aspect.has_resonance(6));
    }

    #[test]
    fn test_depth_and_strength() {
        // trine 1° off: orb in the third harmonic is 4°
        let aspect = Aspect::new(3, 1.0, 121.0, 12.0);
        assert_eq!(aspect.depth(), 4);
        assert_eq!(aspect.strength(), 75.0);
        assert_eq!(aspect.strength_level(), "deep");
        assert_eq!(aspect.harmonic_clearance(), 3.0);

        assert!(aspect.has_resonance(3));
        assert!(aspect.has_resonance(12));
        assert!(!aspect.has_resonance(15));
    }

    #[test]
    fn test_weak_aspect() {
        let aspect = Aspect::new(1, 9.0, 9.0, 12.0);
        assert_eq!(aspect.depth(), 1);
        assert_eq!(aspect.strength_rating(), "★");
        assert_eq!(aspect.strength_level(), "approximate");
        assert!(aspect.has_resonance(1));
        assert!(!aspect.has_resonance(2));
    }

    #[test]
    fn test_weighted_strength() {
        let aspect = Aspect::new(1, 0.0, 0.0, 12.0);
        let expected = 100.0 / 2f64.ln().sqrt();
        assert!((aspect.weighted_strength() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let aspect = Aspect::new(3, 1.0, 121.0, 12.0);
        assert_eq!(
            aspect.to_string(),
            "Resonance 3 (x1) - deep as 4 (75.00%, 1°)"
        );
        assert_eq!(aspect.multipliers(), vec![3]);
    }
}
