//! Chart input files
//!
//! ```yaml
//! name: Family            # optional, defaults to "Synastry: A + B"
//! charts:
//!   - name: Anna
//!     points:
//!       - { name: Sun, position: 283.5 }
//!       - { name: Moon, position: 12.25 }
//! ```
//!
//! Files ending in `.json` are read as JSON, everything else as YAML.

use anyhow::{Context, Result};
use harmonia_core::{Chart, ChartObject, MultiChart};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct PointSpec {
    pub name: String,
    pub position: f64,
}

#[derive(Debug, Deserialize)]
pub struct ChartSpec {
    pub name: String,
    #[serde(default)]
    pub points: Vec<PointSpec>,
}

#[derive(Debug, Deserialize)]
pub struct InputFile {
    #[serde(default)]
    pub name: Option<String>,
    pub charts: Vec<ChartSpec>,
}

impl InputFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let input: InputFile = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {} as JSON", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing {} as YAML", path.display()))?
        };

        if input.charts.is_empty() {
            anyhow::bail!("{} lists no charts", path.display());
        }
        Ok(input)
    }

    /// Build the chart object to analyse
    pub fn into_chart_object(self) -> Result<MultiChart> {
        let charts: Vec<Chart> = self
            .charts
            .into_iter()
            .map(|spec| {
                let chart_name = spec.name.clone();
                Chart::with_points(
                    spec.name,
                    spec.points.into_iter().map(|p| (p.name, p.position)),
                )
                .with_context(|| format!("building chart {}", chart_name))
            })
            .collect::<Result<_>>()?;

        Ok(match self.name {
            Some(name) => MultiChart::new(name, charts),
            None if charts.len() == 1 => {
                let name = charts[0].name().to_string();
                MultiChart::new(name, charts)
            }
            None => {
                let objects: Vec<&dyn ChartObject> =
                    charts.iter().map(|c| c as &dyn ChartObject).collect();
                MultiChart::combine(&objects)
            }
        })
    }
}
