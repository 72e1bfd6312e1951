//! PatternTable - pattern analyses for every chart scope

use crate::analysis::PatternAnalysis;
use crate::frame::{asterisk_frame, double_frame};
use crate::scope::{enumerate_scopes, ChartScope};
use harmonia_core::{ChartHandle, Error, Result};
use harmonia_resonance::{Pattern, ResonanceMatrix};
use rayon::prelude::*;
use serde::Serialize;

/// Scope -> PatternAnalysis
#[derive(Debug, Clone, Serialize)]
pub struct PatternTable {
    charts: Vec<ChartHandle>,
    tables: Vec<(ChartScope, PatternAnalysis)>,
}

impl PatternTable {
    /// Extract patterns for every harmonic and bucket them by chart set.
    ///
    /// Harmonics are processed in parallel; routing happens afterwards in
    /// harmonic order.
    pub fn new(matrix: &ResonanceMatrix) -> Result<Self> {
        let edge_harmonic = matrix.config().edge_harmonic();
        let tables = enumerate_scopes(matrix.charts(), None)
            .into_iter()
            .map(|scope| (scope, PatternAnalysis::new(edge_harmonic)))
            .collect();

        let mut table = Self {
            charts: matrix.charts().iter().map(|c| c.handle().clone()).collect(),
            tables,
        };

        let per_harmonic: Vec<Vec<Pattern>> = (1..=edge_harmonic)
            .into_par_iter()
            .map(|harmonic| matrix.find_patterns(harmonic))
            .collect::<Result<Vec<_>>>()?;

        for pattern in per_harmonic.into_iter().flatten() {
            table.add_pattern(pattern)?;
        }

        tracing::debug!(
            scopes = table.tables.len(),
            patterns = table.pattern_count(),
            "Built pattern table for {}",
            matrix.name()
        );

        Ok(table)
    }

    /// Route a pattern to the scope of exactly its charts
    pub fn add_pattern(&mut self, pattern: Pattern) -> Result<()> {
        let ids = pattern.chart_ids();
        match self.tables.iter_mut().find(|(scope, _)| scope.matches(&ids)) {
            Some((_, analysis)) => {
                analysis.add_pattern(pattern);
                Ok(())
            }
            None => Err(Error::InvariantViolation(format!(
                "no scope for pattern {} over charts {}",
                pattern,
                pattern.charts_string()
            ))),
        }
    }

    pub fn scopes(&self) -> impl Iterator<Item = &ChartScope> + '_ {
        self.tables.iter().map(|(scope, _)| scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChartScope, &PatternAnalysis)> + '_ {
        self.tables.iter().map(|(scope, analysis)| (scope, analysis))
    }

    /// Analysis of one scope
    pub fn analysis_for(&self, scope: &ChartScope) -> Result<&PatternAnalysis> {
        self.tables
            .iter()
            .find(|(candidate, _)| candidate == scope)
            .map(|(_, analysis)| analysis)
            .ok_or_else(|| Error::NotFound(format!("scope {}", scope.title())))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn pattern_count(&self) -> usize {
        self.tables.iter().map(|(_, a)| a.pattern_count()).sum()
    }

    /// Full text report: title, then each scope's analysis
    pub fn report(&self) -> String {
        let names: Vec<&str> = self.charts.iter().map(ChartHandle::name).collect();
        let mut out = double_frame(&format!("Pattern analysis for: {}", names.join(" and ")));
        for (scope, analysis) in &self.tables {
            if self.charts.len() > 1 {
                out.push_str(&asterisk_frame(&format!(
                    "Pattern table for {}:",
                    scope.title()
                )));
            }
            out.push_str(&analysis.full_representation());
        }
        out
    }

    /// One short line per harmonic for every scope
    pub fn short_report(&self) -> String {
        let mut out = String::new();
        for (scope, analysis) in &self.tables {
            out.push_str(&format!("[{}]\n", scope.title()));
            out.push_str(&analysis.short_representation());
        }
        out
    }
}
