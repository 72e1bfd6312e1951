//! HarmonicService - cached matrices and on-demand tables
//!
//! Matrices are keyed by the ordered chart ids of the analysed object, so
//! the same charts in the same order reuse one matrix. A chart edited after
//! its matrix was cached must be released with [`HarmonicService::forget`].

use crate::analysis::PatternAnalysis;
use crate::aspect_table::AspectTable;
use crate::pattern_table::PatternTable;
use crate::scope::ChartScope;
use harmonia_core::{AnalysisConfig, ChartId, ChartObject, Result};
use harmonia_resonance::ResonanceMatrix;
use std::collections::HashMap;
use std::sync::Arc;

/// Entry point for whole-object analyses
#[derive(Debug, Default)]
pub struct HarmonicService {
    config: AnalysisConfig,
    matrices: HashMap<Vec<ChartId>, Arc<ResonanceMatrix>>,
}

impl HarmonicService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            matrices: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Replace the configuration. Cached matrices were built with the old
    /// one and are dropped.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        if config != self.config {
            self.matrices.clear();
        }
        self.config = config;
    }

    fn key_of<O: ChartObject + ?Sized>(object: &O) -> Vec<ChartId> {
        object.charts().iter().map(|c| c.id()).collect()
    }

    /// Matrix for the object, built on first request
    pub fn matrix<O: ChartObject + ?Sized>(&mut self, object: &O) -> Result<Arc<ResonanceMatrix>> {
        let key = Self::key_of(object);
        if let Some(matrix) = self.matrices.get(&key) {
            return Ok(Arc::clone(matrix));
        }

        let matrix = Arc::new(ResonanceMatrix::new(object, self.config)?);
        tracing::debug!(
            cached = self.matrices.len() + 1,
            "Cached resonance matrix for {}",
            object.name()
        );
        self.matrices.insert(key, Arc::clone(&matrix));
        Ok(matrix)
    }

    pub fn pattern_table<O: ChartObject + ?Sized>(&mut self, object: &O) -> Result<PatternTable> {
        let matrix = self.matrix(object)?;
        PatternTable::new(&matrix)
    }

    pub fn aspect_table<O: ChartObject + ?Sized>(&mut self, object: &O) -> Result<AspectTable> {
        let matrix = self.matrix(object)?;
        AspectTable::new(&matrix)
    }

    /// Patterns of the scope covering all of the object's charts
    pub fn pattern_analysis<O: ChartObject + ?Sized>(
        &mut self,
        object: &O,
    ) -> Result<PatternAnalysis> {
        let table = self.pattern_table(object)?;
        let whole = ChartScope::new(object.charts().iter().map(|c| c.handle().clone()).collect());
        table.analysis_for(&whole).cloned()
    }

    /// Drop the cached matrix of an object
    pub fn forget<O: ChartObject + ?Sized>(&mut self, object: &O) -> bool {
        self.matrices.remove(&Self::key_of(object)).is_some()
    }

    pub fn cached(&self) -> usize {
        self.matrices.len()
    }
}
