//! Chart scopes - non-empty subsets of the analysed charts

use harmonia_core::{Chart, ChartHandle, ChartId};
use serde::Serialize;
use std::collections::BTreeSet;

/// An order-independent set of charts.
///
/// Handles are kept in analysis order for display; equality goes by the
/// set of chart ids.
#[derive(Debug, Clone, Serialize)]
pub struct ChartScope {
    charts: Vec<ChartHandle>,
    #[serde(skip)]
    ids: BTreeSet<ChartId>,
}

impl ChartScope {
    pub fn new(charts: Vec<ChartHandle>) -> Self {
        let ids = charts.iter().map(ChartHandle::id).collect();
        Self { charts, ids }
    }

    pub fn charts(&self) -> &[ChartHandle] {
        &self.charts
    }

    pub fn ids(&self) -> &BTreeSet<ChartId> {
        &self.ids
    }

    /// Number of charts in the scope
    pub fn cardinality(&self) -> usize {
        self.ids.len()
    }

    /// Covers exactly these charts
    pub fn matches(&self, ids: &BTreeSet<ChartId>) -> bool {
        &self.ids == ids
    }

    /// Chart names joined with " and "
    pub fn title(&self) -> String {
        self.charts
            .iter()
            .map(ChartHandle::name)
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

impl PartialEq for ChartScope {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for ChartScope {}

/// Every non-empty subset of `charts` up to `max_size` charts (all sizes
/// when `None`), by ascending cardinality, then lexicographic chart order.
pub fn enumerate_scopes(charts: &[Chart], max_size: Option<usize>) -> Vec<ChartScope> {
    let n = charts.len();
    let limit = max_size.unwrap_or(n).min(n);
    let mut scopes = Vec::new();

    for size in 1..=limit {
        // indices of the current combination, advanced like an odometer
        let mut picks: Vec<usize> = (0..size).collect();
        loop {
            scopes.push(ChartScope::new(
                picks.iter().map(|&i| charts[i].handle().clone()).collect(),
            ));

            let Some(pos) = (0..size).rev().find(|&p| picks[p] < n - size + p) else {
                break;
            };
            picks[pos] += 1;
            for p in (pos + 1)..size {
                picks[p] = picks[p - 1] + 1;
            }
        }
    }

    scopes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charts(names: &[&str]) -> Vec<Chart> {
        names.iter().map(|n| Chart::new(*n)).collect()
    }

    #[test]
    fn test_scope_count() {
        for n in 1..=5 {
            let charts = charts(&["A", "B", "C", "D", "E"][..n]);
            assert_eq!(enumerate_scopes(&charts, None).len(), (1 << n) - 1);
        }
    }

    #[test]
    fn test_scope_order() {
        let charts = charts(&["A", "B", "C"]);
        let titles: Vec<String> = enumerate_scopes(&charts, None)
            .iter()
            .map(ChartScope::title)
            .collect();
        assert_eq!(
            titles,
            vec!["A", "B", "C", "A and B", "A and C", "B and C", "A and B and C"]
        );
    }

    #[test]
    fn test_size_limit() {
        let charts = charts(&["A", "B", "C", "D"]);
        let scopes = enumerate_scopes(&charts, Some(2));
        assert_eq!(scopes.len(), 10);
        assert!(scopes.iter().all(|s| s.cardinality() <= 2));
    }

    #[test]
    fn test_scope_equality_ignores_order() {
        let charts = charts(&["A", "B"]);
        let forward = ChartScope::new(vec![charts[0].handle().clone(), charts[1].handle().clone()]);
        let backward = ChartScope::new(vec![charts[1].handle().clone(), charts[0].handle().clone()]);
        assert_eq!(forward, backward);
        assert!(forward.matches(&BTreeSet::from([charts[0].id(), charts[1].id()])));
    }

    #[test]
    fn test_no_charts() {
        assert!(enumerate_scopes(&[], None).is_empty());
    }
}
