//! Pattern - a connected group of points in one harmonic
//!
//! A point belongs to a pattern when it resonates with at least one other
//! member. Every member keeps the sum of its clearances to all the other
//! members; the pattern keeps the sum over all pairs.

use crate::matrix::ResonanceMatrix;
use harmonia_core::{calculate_strength, AnalysisConfig, ChartHandle, ChartId, Point};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// One point of a pattern
#[derive(Debug, Clone, Serialize)]
pub struct PatternMember {
    point: Point,
    slot: usize,
    clearance_sum: f64,
}

impl PatternMember {
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Flat index slot in the matrix the pattern came from
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Sum of clearances to every other member, in degrees
    pub fn clearance_sum(&self) -> f64 {
        self.clearance_sum
    }
}

/// Points linked by resonance in one harmonic
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    harmonic: u32,
    config: AnalysisConfig,
    members: Vec<PatternMember>,
    charts: Vec<ChartHandle>,
    total_clearance: f64,

    /// Some member pair has an aspect of exactly this harmonic
    anchored: bool,
}

impl Pattern {
    pub fn new(harmonic: u32, config: AnalysisConfig) -> Self {
        Self {
            harmonic,
            config,
            members: Vec::new(),
            charts: Vec::new(),
            total_clearance: 0.0,
            anchored: false,
        }
    }

    /// Add the point at `slot` of the matrix, updating every clearance sum.
    /// A point already present is ignored.
    pub fn add_point(&mut self, matrix: &ResonanceMatrix, slot: usize) {
        if self.members.iter().any(|m| m.slot == slot) {
            return;
        }
        let Some(point) = matrix.point(slot) else {
            return;
        };

        if !self.charts.iter().any(|c| c == point.chart()) {
            self.charts.push(point.chart().clone());
        }

        let mut clearance_sum = 0.0;
        for member in &mut self.members {
            let clearance = point.arc_in_harmonic(&member.point, self.harmonic);
            member.clearance_sum += clearance;
            clearance_sum += clearance;
            self.total_clearance += clearance;
            if !self.anchored && matrix.in_resonance_at(slot, member.slot, self.harmonic) {
                self.anchored = true;
            }
        }

        self.members.push(PatternMember {
            point: point.clone(),
            slot,
            clearance_sum,
        });
    }

    pub fn harmonic(&self) -> u32 {
        self.harmonic
    }

    /// Members in insertion order
    pub fn members(&self) -> &[PatternMember] {
        &self.members
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.members.iter().map(|m| &m.point)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.members.iter().any(|m| m.point.is_same(point))
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Charts the members belong to, in order of first appearance
    pub fn charts(&self) -> &[ChartHandle] {
        &self.charts
    }

    pub fn chart_ids(&self) -> BTreeSet<ChartId> {
        self.charts.iter().map(ChartHandle::id).collect()
    }

    /// Number of charts touched
    pub fn dimension(&self) -> usize {
        self.charts.len()
    }

    pub fn total_clearance(&self) -> f64 {
        self.total_clearance
    }

    /// At least two points and an exact-harmonic aspect in some pair
    pub fn is_valid(&self) -> bool {
        self.members.len() >= 2 && self.anchored
    }

    /// Orb for this harmonic, halved for multi-chart patterns under the
    /// half-orb policy
    fn orb(&self) -> f64 {
        self.config.orb_for(self.dimension() > 1) / f64::from(self.harmonic.max(1))
    }

    fn possible_pairs(&self) -> usize {
        self.size() * self.size().saturating_sub(1) / 2
    }

    /// Mean strength over all member pairs; 0 for fewer than two points
    pub fn average_strength(&self) -> f64 {
        if self.size() < 2 {
            return 0.0;
        }
        calculate_strength(self.orb(), self.total_clearance / self.possible_pairs() as f64)
    }

    /// Mean strength of one member's links to the rest
    pub fn member_strength(&self, member: &PatternMember) -> f64 {
        if self.size() < 2 {
            return 0.0;
        }
        calculate_strength(
            self.orb(),
            member.clearance_sum / (self.size() - 1) as f64,
        )
    }

    /// Members ordered from best to worst connected (ascending clearance sum)
    pub fn members_by_connectivity(&self) -> Vec<&PatternMember> {
        let mut sorted: Vec<&PatternMember> = self.members.iter().collect();
        sorted.sort_by(|a, b| a.clearance_sum.total_cmp(&b.clearance_sum));
        sorted
    }

    /// Chart names joined with commas
    pub fn charts_string(&self) -> String {
        self.charts
            .iter()
            .map(ChartHandle::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Headline with average strength and size, then one line per member
    pub fn connectivity_report(&self) -> String {
        if self.size() == 1 {
            return format!("{} (-)\n", self);
        }

        let mut report = format!("\t{:.0}% ({}):\n", self.average_strength(), self.size());
        for member in self.members_by_connectivity() {
            let owner = if self.dimension() > 1 {
                format!(" <{}>", member.point.chart().shortened_name(3))
            } else {
                String::new()
            };
            report.push_str(&format!(
                "\t\t{}{} ({:.0}%)\n",
                member.point.label(),
                owner,
                self.member_strength(member)
            ));
        }
        report
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .members_by_connectivity()
            .into_iter()
            .map(|m| m.point.name())
            .collect();
        write!(f, "{}", names.join("-"))
    }
}
