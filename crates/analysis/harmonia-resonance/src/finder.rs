//! Pattern extraction over a resonance matrix
//!
//! Connected components of the "resonates in harmonic h" relation, found
//! with an explicit worklist. Components without an aspect of exactly `h`
//! are dropped: such points are only linked through lower harmonics.

use crate::matrix::ResonanceMatrix;
use crate::pattern::Pattern;
use harmonia_core::{Error, Result};

impl ResonanceMatrix {
    /// Valid patterns of one harmonic, strongest first
    pub fn find_patterns(&self, harmonic: u32) -> Result<Vec<Pattern>> {
        if harmonic == 0 {
            return Err(Error::InvalidInput(
                "harmonic must be at least 1".to_string(),
            ));
        }

        let n = self.len();
        let mut visited = vec![false; n];
        let mut patterns = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            visited[start] = true;

            let mut pattern = Pattern::new(harmonic, *self.config());
            pattern.add_point(self, start);

            let mut worklist = vec![start];
            while let Some(slot) = worklist.pop() {
                for next in self.connected_indices(slot, harmonic) {
                    if !visited[next] {
                        visited[next] = true;
                        pattern.add_point(self, next);
                        worklist.push(next);
                    }
                }
            }

            if pattern.is_valid() {
                patterns.push(pattern);
            }
        }

        patterns.sort_by(|a, b| b.average_strength().total_cmp(&a.average_strength()));

        tracing::debug!(
            harmonic,
            patterns = patterns.len(),
            "Extracted patterns from {}",
            self.name()
        );

        Ok(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonia_core::{AnalysisConfig, Chart, MultiChart, Point};
    use std::collections::BTreeSet;

    fn config(edge: u32) -> AnalysisConfig {
        AnalysisConfig::new(12.0, edge, true).unwrap()
    }

    fn memberships(patterns: &[Pattern]) -> BTreeSet<BTreeSet<String>> {
        patterns
            .iter()
            .map(|p| p.points().map(|pt| pt.name().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_conjunction_pattern() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Venus", 2.0), ("Mars", 121.0)]).unwrap();
        let matrix = ResonanceMatrix::new(&chart, config(4)).unwrap();

        let patterns = matrix.find_patterns(1).unwrap();
        assert_eq!(patterns.len(), 1);
        let names: BTreeSet<&str> = patterns[0].points().map(Point::name).collect();
        assert_eq!(names, BTreeSet::from(["Sun", "Venus"]));
    }

    #[test]
    fn test_trine_pattern_joins_all() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Venus", 2.0), ("Mars", 121.0)]).unwrap();
        let matrix = ResonanceMatrix::new(&chart, config(4)).unwrap();

        // the conjunction resonates in the third harmonic too
        let patterns = matrix.find_patterns(3).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].size(), 3);
    }

    #[test]
    fn test_lower_harmonic_only_component_is_dropped() {
        // linked in harmonic 2 only through the conjunction
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Venus", 1.0)]).unwrap();
        let matrix = ResonanceMatrix::new(&chart, config(4)).unwrap();
        assert!(matrix.find_patterns(2).unwrap().is_empty());
        assert_eq!(matrix.find_patterns(1).unwrap().len(), 1);
    }

    #[test]
    fn test_sorted_by_strength() {
        let chart = Chart::with_points(
            "Natal",
            [("Sun", 0.0), ("Venus", 5.0), ("Moon", 100.0), ("Mars", 100.5)],
        ).unwrap();
        let matrix = ResonanceMatrix::new(&chart, config(4)).unwrap();

        let patterns = matrix.find_patterns(1).unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(patterns[0].average_strength() >= patterns[1].average_strength());
        assert!(patterns[0].points().any(|p| p.name() == "Moon"));
    }

    #[test]
    fn test_repeatable() {
        let a = Chart::with_points("Anna", [("Sun", 0.0), ("Moon", 90.0), ("Mars", 181.0)]).unwrap();
        let b = Chart::with_points("Boris", [("Sun", 270.5), ("Venus", 1.0)]).unwrap();
        let both = MultiChart::combine(&[&a, &b]);
        let matrix = ResonanceMatrix::new(&both, config(12)).unwrap();

        for harmonic in 1..=12 {
            let first = matrix.find_patterns(harmonic).unwrap();
            let second = matrix.find_patterns(harmonic).unwrap();
            assert_eq!(memberships(&first), memberships(&second));
            for pattern in &first {
                assert!(pattern.size() >= 2);
                assert!(pattern.is_valid());
            }
        }
    }

    #[test]
    fn test_each_point_in_at_most_one_pattern() {
        let chart = Chart::with_points(
            "Natal",
            [("Sun", 0.0), ("Moon", 90.0), ("Mars", 180.0), ("Venus", 270.0)],
        ).unwrap();
        let matrix = ResonanceMatrix::new(&chart, config(8)).unwrap();

        let patterns = matrix.find_patterns(4).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].size(), 4);
        assert_eq!(patterns[0].average_strength(), 100.0);
    }

    #[test]
    fn test_harmonic_zero_rejected() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0)]).unwrap();
        let matrix = ResonanceMatrix::new(&chart, config(4)).unwrap();
        assert!(matches!(matrix.find_patterns(0), Err(Error::InvalidInput(_))));
        assert!(matrix.find_patterns(1).unwrap().is_empty());
    }
}
