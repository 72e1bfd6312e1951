//! ResonanceMatrix - all pairwise batches of one analysis
//!
//! Points of every chart are flattened into one index (chart order, then
//! point order). Batches for pairs `i < j` are stored row by row in a
//! packed upper triangle, so `n` points need `n(n-1)/2` cells.

use crate::batch::ResonanceBatch;
use harmonia_core::{AnalysisConfig, Chart, ChartId, ChartObject, Point};
use harmonia_core::{Error, Result};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Pairwise resonance table over the points of a chart object
#[derive(Debug, Clone)]
pub struct ResonanceMatrix {
    /// Title of the analysed object
    name: String,

    /// Configuration captured at construction
    config: AnalysisConfig,

    /// Charts in analysis order
    charts: Vec<Chart>,

    /// Flattened points, index = slot
    points: Vec<Point>,

    /// Chart id -> point name -> slot
    index: HashMap<ChartId, HashMap<String, usize>>,

    /// Packed upper triangle of batches
    cells: Vec<ResonanceBatch>,
}

impl ResonanceMatrix {
    /// Build the matrix for any chart object.
    ///
    /// A chart supplied twice is rejected.
    pub fn new<O: ChartObject + ?Sized>(object: &O, config: AnalysisConfig) -> Result<Self> {
        let charts: Vec<Chart> = object.charts().to_vec();

        let mut seen = HashSet::new();
        for chart in &charts {
            if !seen.insert(chart.id()) {
                return Err(Error::InvalidInput(format!(
                    "chart {} appears more than once in {}",
                    chart.name(),
                    object.name()
                )));
            }
        }

        let mut points = Vec::new();
        let mut index: HashMap<ChartId, HashMap<String, usize>> = HashMap::new();
        for chart in &charts {
            let slots = index.entry(chart.id()).or_default();
            for point in chart.points() {
                slots.insert(point.name().to_string(), points.len());
                points.push(point.clone());
            }
        }

        let n = points.len();
        let rows: Vec<Vec<ResonanceBatch>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| ResonanceBatch::new(&points[i], &points[j], &config))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let cells: Vec<ResonanceBatch> = rows.into_iter().flatten().collect();

        tracing::debug!(
            charts = charts.len(),
            points = n,
            batches = cells.len(),
            "Built resonance matrix for {}",
            object.name()
        );

        Ok(Self {
            name: object.name().to_string(),
            config,
            charts,
            points,
            index,
            cells,
        })
    }

    /// Offset of pair `(i, j)`, `i < j`, in the packed triangle
    fn cell_index(&self, i: usize, j: usize) -> usize {
        let n = self.points.len();
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// All points in flat index order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, slot: usize) -> Option<&Point> {
        self.points.get(slot)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index slot of a point
    pub fn index_of(&self, point: &Point) -> Result<usize> {
        self.index
            .get(&point.chart().id())
            .and_then(|slots| slots.get(point.name()))
            .copied()
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "point {} of chart {}",
                    point.name(),
                    point.chart().name()
                ))
            })
    }

    /// Batch for two slots in either order; `None` for the diagonal or
    /// out-of-range slots
    pub fn batch_at(&self, a: usize, b: usize) -> Option<&ResonanceBatch> {
        let n = self.points.len();
        if a == b || a >= n || b >= n {
            return None;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        self.cells.get(self.cell_index(i, j))
    }

    /// The batch shared by two points. Both argument orders give the same batch.
    pub fn resonance_between(&self, a: &Point, b: &Point) -> Result<&ResonanceBatch> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.batch_at(ia, ib).ok_or_else(|| {
            Error::NotFound(format!("no resonance of point {} with itself", a.name()))
        })
    }

    /// Every batch involving the point, in flat index order of the partner
    pub fn resonances_involving(&self, point: &Point) -> Result<Vec<&ResonanceBatch>> {
        let slot = self.index_of(point)?;
        Ok(self.row(slot).map(|(_, batch)| batch).collect())
    }

    /// Symmetric view of one row: `(partner slot, batch)` for every other slot
    fn row(&self, slot: usize) -> impl Iterator<Item = (usize, &ResonanceBatch)> + '_ {
        (0..self.points.len())
            .filter(move |&k| k != slot)
            .filter_map(move |k| self.batch_at(slot, k).map(|batch| (k, batch)))
    }

    /// Slots connected to `slot` in harmonic `harmonic`
    pub fn connected_indices(&self, slot: usize, harmonic: u32) -> Vec<usize> {
        self.row(slot)
            .filter(|(_, batch)| batch.has_harmonic_pattern(harmonic))
            .map(|(k, _)| k)
            .collect()
    }

    /// Points whose batch with `point` resonates in harmonic `harmonic`
    pub fn connected_points(&self, point: &Point, harmonic: u32) -> Result<Vec<&Point>> {
        let slot = self.index_of(point)?;
        Ok(self
            .connected_indices(slot, harmonic)
            .into_iter()
            .map(|k| &self.points[k])
            .collect())
    }

    /// The pair carries an aspect of exactly this harmonic
    pub fn in_resonance(&self, a: &Point, b: &Point, harmonic: u32) -> Result<bool> {
        Ok(self.resonance_between(a, b)?.has_given_harmonic(harmonic))
    }

    pub(crate) fn in_resonance_at(&self, a: usize, b: usize, harmonic: u32) -> bool {
        self.batch_at(a, b)
            .is_some_and(|batch| batch.has_given_harmonic(harmonic))
    }

    /// First point with this name in flat index order
    pub fn find_point(&self, name: &str) -> Result<&Point> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("point name is blank".to_string()));
        }
        self.points
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::NotFound(format!("point {}", name)))
    }

    /// Point with this name in the chart with this name
    pub fn find_point_in(&self, chart_name: &str, name: &str) -> Result<&Point> {
        let chart_name = chart_name.trim();
        let name = name.trim();
        if chart_name.is_empty() || name.is_empty() {
            return Err(Error::InvalidInput(
                "chart and point names must not be blank".to_string(),
            ));
        }
        let chart = self
            .charts
            .iter()
            .find(|c| c.name() == chart_name)
            .ok_or_else(|| Error::NotFound(format!("chart {}", chart_name)))?;
        let slot = self
            .index
            .get(&chart.id())
            .and_then(|slots| slots.get(name))
            .copied()
            .ok_or_else(|| Error::NotFound(format!("point {} in chart {}", name, chart_name)))?;
        Ok(&self.points[slot])
    }

    /// All batches, pairs in flat index order
    pub fn batches(&self) -> impl Iterator<Item = &ResonanceBatch> + '_ {
        self.cells.iter()
    }
}
