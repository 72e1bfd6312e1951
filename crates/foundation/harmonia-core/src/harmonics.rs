//! Harmonic math - arcs, harmonic frames, factorization
//!
//! A harmonic `h` divides the circle into `h` unit arcs of `360/h` degrees.
//! Two positions resonate in harmonic `h` when their arc lies close to some
//! whole multiple of that unit arc. The tolerance shrinks with the harmonic:
//! a primal orb of 12° becomes `12/h` degrees in harmonic `h`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full circle in degrees
pub const CIRCLE: f64 = 360.0;

/// Half circle in degrees, the largest possible arc
pub const HALF_CIRCLE: f64 = 180.0;

/// Bring any coordinate into `[0, 360)`.
pub fn normalize_coordinate(position: f64) -> f64 {
    let reduced = position % CIRCLE;
    let wrapped = if reduced < 0.0 { reduced + CIRCLE } else { reduced };
    if wrapped >= CIRCLE {
        0.0
    } else {
        wrapped
    }
}

/// Shortest undirected angular separation between two positions, 0-180°.
pub fn arc(a: f64, b: f64) -> f64 {
    let distance = (normalize_coordinate(a) - normalize_coordinate(b)).abs();
    if distance > HALF_CIRCLE {
        CIRCLE - distance
    } else {
        distance
    }
}

/// Distance of the arc between two positions from the nearest exact
/// multiple of the unit arc `360/h`, in degrees. Range `[0, 180/h]`.
///
/// Harmonic 0 has no unit arc and is read as harmonic 1.
pub fn arc_in_harmonic(a: f64, b: f64, harmonic: u32) -> f64 {
    let unit = CIRCLE / f64::from(harmonic.max(1));
    let remainder = arc(a, b) % unit;
    remainder.min(unit - remainder).max(0.0)
}

/// Prime factors of a number, largest first.
///
/// `0` factors as `[0]` and `1` as `[1]`; negative numbers are rejected.
pub fn prime_factors(number: i64) -> Result<Vec<u64>> {
    if number < 0 {
        return Err(Error::InvalidInput(format!(
            "cannot factorize negative number {}",
            number
        )));
    }
    let mut rest = number as u64;
    match rest {
        0 => return Ok(vec![0]),
        1 => return Ok(vec![1]),
        _ => {}
    }

    let mut factors = Vec::new();
    let mut divider = 2u64;
    while rest > 1 {
        if divider > rest / divider {
            factors.push(rest);
            break;
        }
        if rest % divider == 0 {
            factors.push(divider);
            rest /= divider;
        } else {
            divider += 1;
        }
    }

    factors.sort_unstable_by(|a, b| b.cmp(a));
    Ok(factors)
}

/// Multiplicity of a harmonic-`h` match: how many unit arcs `360/h`
/// the arc spans.
///
/// Returns the smallest `m` in `1..=h/2` with `|m * 360/h - arc| < orb/h`,
/// or 1 when no multiple is within the per-harmonic orb.
pub fn find_multiplicity(harmonic: u32, arc: f64, orb: f64) -> u32 {
    let harmonic = harmonic.max(1);
    let unit = CIRCLE / f64::from(harmonic);
    let orb_here = orb / f64::from(harmonic);
    let upper = (harmonic / 2).max(1);

    (1..=upper)
        .find(|&m| (f64::from(m) * unit - arc).abs() < orb_here)
        .unwrap_or(1)
}

/// Linear strength of a match in percent: 100 at zero clearance,
/// 0 at clearance equal to the orb.
pub fn calculate_strength(orb: f64, clearance: f64) -> f64 {
    if orb <= 0.0 {
        return 0.0;
    }
    (100.0 * (1.0 - clearance / orb)).clamp(0.0, 100.0)
}

/// Format prime multipliers as `<3x2>`.
pub fn format_multipliers(multipliers: &[u64]) -> String {
    let joined = multipliers
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("x");
    format!("<{}>", joined)
}

/// One line per number from 0 to `upto`, listing its prime factors
/// and, for composite numbers, their sum.
pub fn multipliers_table(upto: u32) -> String {
    let mut output = String::new();
    for number in 0..=upto {
        let factors = prime_factors(i64::from(number)).unwrap_or_default();
        output.push_str(&format!("{:>3} → ", number));
        output.push_str(
            &factors
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(" + "),
        );
        if factors.len() > 1 {
            output.push_str(&format!(" = {}", factors.iter().sum::<u64>()));
        }
        output.push('\n');
    }
    output
}

/// A harmonic number together with its prime decomposition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Harmonic {
    number: u32,
    multipliers: Vec<u64>,
}

impl Harmonic {
    pub fn new(number: u32) -> Self {
        let multipliers = prime_factors(i64::from(number)).unwrap_or_default();
        Self {
            number,
            multipliers,
        }
    }

    /// Harmonics `1..=upto`
    pub fn generate_up_to(upto: u32) -> Vec<Harmonic> {
        (1..=upto).map(Harmonic::new).collect()
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Prime multipliers, largest first
    pub fn multipliers(&self) -> &[u64] {
        &self.multipliers
    }

    /// Number of prime multipliers
    pub fn complexity(&self) -> usize {
        self.multipliers.len()
    }

    /// True if the harmonic is prime (or 1)
    pub fn is_simple(&self) -> bool {
        self.complexity() == 1
    }

    pub fn multipliers_sum(&self) -> u64 {
        self.multipliers.iter().sum()
    }

    /// Length of the unit arc, folded into 0-180°. Zero for the first harmonic.
    pub fn single_pure_arc(&self) -> f64 {
        if self.number == 0 {
            return 0.0;
        }
        arc(0.0, CIRCLE / f64::from(self.number))
    }

    pub fn next(&self) -> Harmonic {
        Harmonic::new(self.number + 1)
    }
}

impl fmt::Display for Harmonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, format_multipliers(&self.multipliers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_coordinate() {
        assert_eq!(normalize_coordinate(370.0), 10.0);
        assert_eq!(normalize_coordinate(-10.0), 350.0);
        assert_eq!(normalize_coordinate(360.0), 0.0);
    }

    #[test]
    fn test_arc_wraps_shortest_way() {
        assert_eq!(arc(10.0, 350.0), 20.0);
        assert_eq!(arc(0.0, 180.0), 180.0);
        assert_eq!(arc(90.0, 0.0), 90.0);
    }

    #[test]
    fn test_arc_in_harmonic_range() {
        for h in 1..=36u32 {
            for step in 0..72 {
                let b = f64::from(step) * 5.3;
                let c = arc_in_harmonic(0.0, b, h);
                assert!(c >= 0.0);
                assert!(c <= HALF_CIRCLE / f64::from(h) + 1e-9);
            }
        }
    }

    #[test]
    fn test_arc_in_harmonic_exact_square() {
        assert_eq!(arc_in_harmonic(0.0, 90.0, 4), 0.0);
        assert!((arc_in_harmonic(0.0, 93.0, 4) - 3.0).abs() < 1e-9);
        assert!((arc_in_harmonic(0.0, 121.0, 3) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(0).unwrap(), vec![0]);
        assert_eq!(prime_factors(1).unwrap(), vec![1]);
        assert_eq!(prime_factors(12).unwrap(), vec![3, 2, 2]);
        assert_eq!(prime_factors(108).unwrap(), vec![3, 3, 3, 2, 2]);
        assert_eq!(prime_factors(97).unwrap(), vec![97]);
        assert!(matches!(prime_factors(-4), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_find_multiplicity() {
        assert_eq!(find_multiplicity(4, 90.0, 12.0), 1);
        assert_eq!(find_multiplicity(5, 144.0, 12.0), 2);
        assert_eq!(find_multiplicity(7, 154.3, 12.0), 3);
        assert_eq!(find_multiplicity(1, 3.0, 12.0), 1);
        // nothing within 12/5 degrees of a quintile multiple
        assert_eq!(find_multiplicity(5, 100.0, 12.0), 1);
    }

    #[test]
    fn test_calculate_strength() {
        assert_eq!(calculate_strength(12.0, 0.0), 100.0);
        assert_eq!(calculate_strength(12.0, 6.0), 50.0);
        assert_eq!(calculate_strength(12.0, 12.0), 0.0);
        assert_eq!(calculate_strength(12.0, 20.0), 0.0);
    }

    #[test]
    fn test_harmonic_properties() {
        let h = Harmonic::new(12);
        assert_eq!(h.complexity(), 3);
        assert!(!h.is_simple());
        assert_eq!(h.multipliers_sum(), 7);
        assert_eq!(h.to_string(), "12 <3x2x2>");
        assert!(Harmonic::new(7).is_simple());
        assert_eq!(Harmonic::new(1).single_pure_arc(), 0.0);
        assert_eq!(Harmonic::new(3).single_pure_arc(), 120.0);
        assert_eq!(Harmonic::generate_up_to(5).len(), 5);
    }

    #[test]
    fn test_multipliers_table() {
        let table = multipliers_table(6);
        assert!(table.contains("  6 → 3 + 2 = 5"));
        assert!(table.contains("  5 → 5\n"));
    }
}
