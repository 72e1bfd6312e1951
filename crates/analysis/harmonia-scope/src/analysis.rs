//! PatternAnalysis - patterns of one scope, keyed by harmonic

use crate::frame::singular_frame;
use harmonia_resonance::Pattern;
use serde::Serialize;
use std::collections::BTreeMap;

/// Harmonic -> patterns for one chart scope
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternAnalysis {
    edge_harmonic: u32,
    patterns: BTreeMap<u32, Vec<Pattern>>,
}

impl PatternAnalysis {
    /// Empty analysis reporting harmonics `1..=edge_harmonic`
    pub fn new(edge_harmonic: u32) -> Self {
        Self {
            edge_harmonic,
            patterns: BTreeMap::new(),
        }
    }

    /// Append a pattern to the list of its harmonic
    pub fn add_pattern(&mut self, pattern: Pattern) {
        self.patterns
            .entry(pattern.harmonic())
            .or_default()
            .push(pattern);
    }

    /// Patterns of one harmonic, empty if none
    pub fn patterns_for(&self, harmonic: u32) -> &[Pattern] {
        self.patterns
            .get(&harmonic)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Harmonics that have at least one pattern, ascending
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Pattern])> + '_ {
        self.patterns.iter().map(|(h, list)| (*h, list.as_slice()))
    }

    /// Number of harmonics with patterns
    pub fn harmonic_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn edge_harmonic(&self) -> u32 {
        self.edge_harmonic
    }

    /// Mean of the average strengths of this harmonic's patterns
    pub fn average_strength_for(&self, harmonic: u32) -> f64 {
        let patterns = self.patterns_for(harmonic);
        if patterns.is_empty() {
            return 0.0;
        }
        patterns.iter().map(Pattern::average_strength).sum::<f64>() / patterns.len() as f64
    }

    /// Total members across this harmonic's patterns
    pub fn point_count_for(&self, harmonic: u32) -> usize {
        self.patterns_for(harmonic).iter().map(Pattern::size).sum()
    }

    /// Framed header with totals, then every pattern's connectivity report
    pub fn detailed_representation(&self, harmonic: u32) -> String {
        let patterns = self.patterns_for(harmonic);
        if patterns.is_empty() {
            return singular_frame(&format!("No patterns in harmonic {}", harmonic));
        }

        let mut out = singular_frame(&format!(
            "Patterns in harmonic {}\n<points {}, average strength {:.0}%>",
            harmonic,
            self.point_count_for(harmonic),
            self.average_strength_for(harmonic)
        ));
        let body: Vec<String> = patterns
            .iter()
            .map(Pattern::connectivity_report)
            .collect();
        out.push_str(&body.join("_______\n"));
        out.push_str("_______\n\n");
        out
    }

    /// Detailed representation of every harmonic up to the edge
    pub fn full_representation(&self) -> String {
        (1..=self.edge_harmonic)
            .map(|h| self.detailed_representation(h))
            .collect()
    }

    /// One line per harmonic with patterns: `3: Sun-Mars | Moon-Venus`
    pub fn short_representation(&self) -> String {
        self.patterns
            .iter()
            .map(|(harmonic, list)| {
                let joined = list
                    .iter()
                    .map(Pattern::to_string)
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("{}: {}\n", harmonic, joined)
            })
            .collect()
    }
}
