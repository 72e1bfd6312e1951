//! AspectTable - resonance batches grouped by chart scope

use crate::frame::{asterisk_frame, double_frame};
use crate::scope::{enumerate_scopes, ChartScope};
use harmonia_core::{ChartHandle, Error, Result};
use harmonia_resonance::{ResonanceBatch, ResonanceMatrix};
use serde::Serialize;
use std::collections::BTreeSet;

/// A batch joins two points, so no scope is wider than two charts
const MAX_SCOPE: usize = 2;

/// Scope -> batches, each list in flat index order
#[derive(Debug, Clone, Serialize)]
pub struct AspectTable {
    charts: Vec<ChartHandle>,
    tables: Vec<(ChartScope, Vec<ResonanceBatch>)>,
}

impl AspectTable {
    pub fn new(matrix: &ResonanceMatrix) -> Result<Self> {
        let tables = enumerate_scopes(matrix.charts(), Some(MAX_SCOPE))
            .into_iter()
            .map(|scope| (scope, Vec::new()))
            .collect();

        let mut table = Self {
            charts: matrix.charts().iter().map(|c| c.handle().clone()).collect(),
            tables,
        };

        for batch in matrix.batches() {
            table.add_batch(batch.clone())?;
        }

        tracing::debug!(
            scopes = table.tables.len(),
            batches = table.batch_count(),
            "Built aspect table for {}",
            matrix.name()
        );

        Ok(table)
    }

    /// Route a batch to the scope of exactly its charts
    pub fn add_batch(&mut self, batch: ResonanceBatch) -> Result<()> {
        let ids: BTreeSet<_> = batch.charts().iter().map(ChartHandle::id).collect();
        match self.tables.iter_mut().find(|(scope, _)| scope.matches(&ids)) {
            Some((_, batches)) => {
                batches.push(batch);
                Ok(())
            }
            None => Err(Error::InvariantViolation(format!(
                "no scope for the batch of {} and {}",
                batch.first().label(),
                batch.second().label()
            ))),
        }
    }

    pub fn scopes(&self) -> impl Iterator<Item = &ChartScope> + '_ {
        self.tables.iter().map(|(scope, _)| scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChartScope, &[ResonanceBatch])> + '_ {
        self.tables
            .iter()
            .map(|(scope, batches)| (scope, batches.as_slice()))
    }

    /// Batches of one scope
    pub fn batches_for(&self, scope: &ChartScope) -> Result<&[ResonanceBatch]> {
        self.tables
            .iter()
            .find(|(candidate, _)| candidate == scope)
            .map(|(_, batches)| batches.as_slice())
            .ok_or_else(|| Error::NotFound(format!("scope {}", scope.title())))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn batch_count(&self) -> usize {
        self.tables.iter().map(|(_, b)| b.len()).sum()
    }

    /// Full text report: title, then every batch of every scope
    pub fn report(&self) -> String {
        let names: Vec<&str> = self.charts.iter().map(ChartHandle::name).collect();
        let mut out = double_frame(&format!("Resonance analysis for: {}", names.join(" and ")));
        for (scope, batches) in &self.tables {
            if self.charts.len() > 1 {
                out.push_str(&asterisk_frame(&format!("Aspects for {}:", scope.title())));
            }
            for batch in batches {
                out.push_str(&batch.resonances_output());
            }
        }
        out
    }
}
