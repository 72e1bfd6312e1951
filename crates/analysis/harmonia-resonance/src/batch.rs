//! ResonanceBatch - every aspect found between two points
//!
//! Harmonics are scanned in increasing order from 1 to the edge harmonic.
//! A harmonic that is a multiple of one already accepted usually repeats
//! that earlier aspect and is skipped. The exception is an arc that sits
//! inside the conjunction orb but is wide enough to carry its own single
//! multiple of the new harmonic.

use crate::aspect::Aspect;
use crate::interpret::aspect_name;
use harmonia_core::{find_multiplicity, format_degrees, AnalysisConfig, ChartHandle, Point};
use harmonia_core::{Error, Result};
use serde::Serialize;

/// Aspects of the arc between two points
#[derive(Debug, Clone, Serialize)]
pub struct ResonanceBatch {
    first: Point,
    second: Point,
    arc: f64,
    orb: f64,
    edge_harmonic: u32,
    charts: Vec<ChartHandle>,
    aspects: Vec<Aspect>,
}

impl ResonanceBatch {
    /// Find all aspects between two distinct points
    pub fn new(first: &Point, second: &Point, config: &AnalysisConfig) -> Result<Self> {
        if first.is_same(second) {
            return Err(Error::InvalidInput(format!(
                "point {} cannot resonate with itself",
                first.name()
            )));
        }

        let mut charts = vec![first.chart().clone()];
        if !first.is_of_same_chart(second) {
            charts.push(second.chart().clone());
        }

        let arc = first.arc_to(second);
        let orb = config.orb_for(charts.len() > 1);
        let edge_harmonic = config.edge_harmonic();

        let mut batch = Self {
            first: first.clone(),
            second: second.clone(),
            arc,
            orb,
            edge_harmonic,
            charts,
            aspects: Vec::new(),
        };

        for harmonic in 1..=edge_harmonic {
            let clearance = first.arc_in_harmonic(second, harmonic);
            if clearance < orb / f64::from(harmonic) && batch.is_new_simple(harmonic) {
                batch
                    .aspects
                    .push(Aspect::new(harmonic, clearance, arc, orb));
            }
        }

        Ok(batch)
    }

    /// Whether `harmonic` adds something the accepted aspects do not
    /// already express
    fn is_new_simple(&self, harmonic: u32) -> bool {
        let mut is_conjunction = false;

        for accepted in &self.aspects {
            let previous = accepted.harmonic();
            if previous == 1 {
                is_conjunction = true;
            }

            if harmonic % previous != 0 {
                continue;
            }

            if is_conjunction
                && self.arc > self.orb / f64::from(harmonic)
                && find_multiplicity(harmonic, self.arc, self.orb) == 1
            {
                continue;
            }

            return false;
        }
        true
    }

    pub fn first(&self) -> &Point {
        &self.first
    }

    pub fn second(&self) -> &Point {
        &self.second
    }

    /// Raw arc between the points, 0-180°
    pub fn arc(&self) -> f64 {
        self.arc
    }

    /// Orb in force for this pair
    pub fn orb(&self) -> f64 {
        self.orb
    }

    pub fn edge_harmonic(&self) -> u32 {
        self.edge_harmonic
    }

    /// Charts the two points belong to (one or two)
    pub fn charts(&self) -> &[ChartHandle] {
        &self.charts
    }

    /// Accepted aspects in increasing harmonic order
    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }

    /// Points belong to different charts
    pub fn is_synastric(&self) -> bool {
        self.charts.len() == 2
    }

    /// An aspect of exactly this harmonic was found
    pub fn has_given_harmonic(&self, harmonic: u32) -> bool {
        self.aspects.iter().any(|a| a.harmonic() == harmonic)
    }

    /// Some aspect appears as a conjunction in harmonic `harmonic`
    pub fn has_harmonic_pattern(&self, harmonic: u32) -> bool {
        self.aspects.iter().any(|a| a.has_resonance(harmonic))
    }

    /// The other point of the pair, if `taken` is one of them
    pub fn counterpart(&self, taken: &Point) -> Option<&Point> {
        if self.first.is_same(taken) {
            Some(&self.second)
        } else if self.second.is_same(taken) {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Aspects sorted by descending strength
    pub fn aspects_by_strength(&self) -> Vec<&Aspect> {
        let mut sorted: Vec<&Aspect> = self.aspects.iter().collect();
        sorted.sort_by(|a, b| b.strength().total_cmp(&a.strength()));
        sorted
    }

    /// Header line naming both points and the arc
    pub fn title(&self) -> String {
        if self.is_synastric() {
            format!(
                "\n* Arc between {} ({}) and {} ({}) = {}\n",
                self.first.label(),
                self.first.chart().name(),
                self.second.label(),
                self.second.chart().name(),
                format_degrees(self.arc)
            )
        } else {
            format!(
                "\n* Arc between {} and {} ({}) = {}\n",
                self.first.label(),
                self.second.label(),
                self.first.chart().name(),
                format_degrees(self.arc)
            )
        }
    }

    /// One line per aspect, strongest first
    pub fn aspects_report(&self) -> String {
        if self.aspects.is_empty() {
            return format!(
                "No resonances up to {} with orb {}\n",
                self.edge_harmonic,
                format_degrees(self.orb)
            );
        }

        self.aspects_by_strength()
            .into_iter()
            .map(|aspect| {
                format!(
                    "{:<16} {}/{} {} ({:.0}%) --- {:.2}\n",
                    aspect_name(aspect.harmonic(), aspect.multiplicity()),
                    aspect.multiplicity(),
                    aspect.harmonic(),
                    aspect.strength_rating(),
                    aspect.strength(),
                    aspect.weighted_strength()
                )
            })
            .collect()
    }

    /// Title followed by the aspect report
    pub fn resonances_output(&self) -> String {
        format!("{}{}", self.title(), self.aspects_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonia_core::Chart;

    fn config(edge: u32) -> AnalysisConfig {
        AnalysisConfig::new(12.0, edge, true).unwrap()
    }

    #[test]
    fn test_exact_square() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Moon", 90.0)]).unwrap();
        let batch =
            ResonanceBatch::new(&chart.points()[0], &chart.points()[1], &config(12)).unwrap();

        assert_eq!(batch.arc(), 90.0);
        assert_eq!(batch.aspects().len(), 1);
        let square = &batch.aspects()[0];
        assert_eq!(square.harmonic(), 4);
        assert_eq!(square.multiplicity(), 1);
        assert_eq!(square.clearance(), 0.0);
        assert_eq!(square.strength(), 100.0);

        // the octile repeats the square and is not listed
        assert!(!batch.has_given_harmonic(8));
        assert!(batch.has_harmonic_pattern(8));
    }

    #[test]
    fn test_exact_conjunction_is_alone() {
        let chart = Chart::with_points("Natal", [("Sun", 45.0), ("Moon", 45.0)]).unwrap();
        for edge in [1, 12, 108] {
            let batch =
                ResonanceBatch::new(&chart.points()[0], &chart.points()[1], &config(edge))
                    .unwrap();
            let harmonics: Vec<u32> = batch.aspects().iter().map(|a| a.harmonic()).collect();
            assert_eq!(harmonics, vec![1]);
        }
    }

    #[test]
    fn test_wide_conjunction_keeps_own_harmonics() {
        // 10° is inside the 12° conjunction orb; in harmonic 36 (unit arc
        // 10°) it is an exact single multiple and is kept
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Moon", 10.0)]).unwrap();
        let batch =
            ResonanceBatch::new(&chart.points()[0], &chart.points()[1], &config(36)).unwrap();
        assert!(batch.has_given_harmonic(1));
        assert!(batch.has_given_harmonic(36));
        assert!(!batch.has_given_harmonic(2));
    }

    #[test]
    fn test_same_point_rejected() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0)]).unwrap();
        let sun = &chart.points()[0];
        assert!(matches!(
            ResonanceBatch::new(sun, sun, &config(12)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_synastric_orb_is_halved() {
        let a = Chart::with_points("Anna", [("Sun", 0.0)]).unwrap();
        let b = Chart::with_points("Boris", [("Moon", 8.0)]).unwrap();
        let batch = ResonanceBatch::new(&a.points()[0], &b.points()[0], &config(12)).unwrap();

        assert!(batch.is_synastric());
        assert_eq!(batch.orb(), 6.0);
        assert!(!batch.has_given_harmonic(1));

        let full = AnalysisConfig::new(12.0, 12, false).unwrap();
        let batch = ResonanceBatch::new(&a.points()[0], &b.points()[0], &full).unwrap();
        assert_eq!(batch.orb(), 12.0);
        assert!(batch.has_given_harmonic(1));
    }

    #[test]
    fn test_batch_json() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Moon", 90.0)]).unwrap();
        let batch =
            ResonanceBatch::new(&chart.points()[0], &chart.points()[1], &config(12)).unwrap();

        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["arc"], 90.0);
        assert_eq!(value["aspects"][0]["harmonic"], 4);
        assert_eq!(value["first"]["name"], "Sun");
    }

    #[test]
    fn test_counterpart() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Moon", 90.0), ("Mars", 5.0)]).unwrap();
        let points = chart.points();
        let batch = ResonanceBatch::new(&points[0], &points[1], &config(12)).unwrap();

        assert_eq!(batch.counterpart(&points[0]), Some(&points[1]));
        assert_eq!(batch.counterpart(&points[1]), Some(&points[0]));
        assert_eq!(batch.counterpart(&points[2]), None);
    }

    #[test]
    fn test_reports() {
        let chart = Chart::with_points("Natal", [("Sun", 0.0), ("Moon", 90.0)]).unwrap();
        let batch =
            ResonanceBatch::new(&chart.points()[0], &chart.points()[1], &config(12)).unwrap();

        let output = batch.resonances_output();
        assert!(output.contains("* Arc between Sun ♈0° and Moon ♋0° (Natal) = 90°"));
        assert!(output.contains("square"));
        assert!(output.contains("1/4"));
        assert!(output.contains("(100%)"));

        let empty_chart = Chart::with_points("Natal", [("Sun", 0.0), ("Moon", 77.0)]).unwrap();
        let empty = ResonanceBatch::new(
            &empty_chart.points()[0],
            &empty_chart.points()[1],
            &config(2),
        )
        .unwrap();
        assert!(empty.is_empty());
        assert!(empty.aspects_report().starts_with("No resonances up to 2"));
    }
}
