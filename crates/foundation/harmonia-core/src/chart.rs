//! Charts and points
//!
//! A [`Chart`] owns an ordered, name-unique list of [`Point`]s. Each point
//! carries a [`ChartHandle`] back to its owner so that identity ("same name,
//! same chart") survives when points are copied into an analysis.

use crate::format::DegreeParts;
use crate::harmonics::{arc, arc_in_harmonic, normalize_coordinate};
use crate::{format_degrees, Error, Result, ZodiacSign};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Unique chart identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChartId(Uuid);

impl ChartId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChartId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning reference from a point to its chart.
///
/// Equality and hashing go by chart id only.
#[derive(Debug, Clone, Serialize)]
pub struct ChartHandle {
    id: ChartId,
    name: String,
}

impl ChartHandle {
    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name cut to `limit` characters, ending in "…" when shortened
    pub fn shortened_name(&self, limit: usize) -> String {
        shorten(&self.name, limit)
    }
}

impl PartialEq for ChartHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ChartHandle {}

impl Hash for ChartHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A named angular position belonging to one chart
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    name: String,
    position: f64,
    chart: ChartHandle,
}

impl Point {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ecliptic position in `[0, 360)`
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn chart(&self) -> &ChartHandle {
        &self.chart
    }

    /// Same name in the same chart
    pub fn is_same(&self, other: &Point) -> bool {
        self == other
    }

    pub fn is_of_same_chart(&self, other: &Point) -> bool {
        self.chart == other.chart
    }

    pub fn arc_to(&self, other: &Point) -> f64 {
        arc(self.position, other.position)
    }

    pub fn arc_in_harmonic(&self, other: &Point, harmonic: u32) -> f64 {
        arc_in_harmonic(self.position, other.position, harmonic)
    }

    /// Position rounded to the whole second, wrapped into `[0, 360)`
    fn displayed_position(&self) -> f64 {
        normalize_coordinate(DegreeParts::round_to_second(self.position))
    }

    /// Sign of the position as displayed (rounded to the second)
    pub fn zodiac_sign(&self) -> ZodiacSign {
        ZodiacSign::of(self.displayed_position())
    }

    /// Position inside its sign, e.g. `♈12°30'`
    pub fn zodiac_degree(&self) -> String {
        let shown = self.displayed_position();
        format!(
            "{}{}",
            ZodiacSign::of(shown).symbol(),
            format_degrees(shown % 30.0)
        )
    }

    /// Name followed by zodiac degree
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.zodiac_degree())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.chart == other.chart && self.name == other.name
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chart.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A named, ordered collection of uniquely named points
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    handle: ChartHandle,
    points: Vec<Point>,
}

impl Chart {
    /// Create an empty chart
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: ChartHandle {
                id: ChartId::new(),
                name: name.into(),
            },
            points: Vec::new(),
        }
    }

    /// Create a chart from `(name, position)` pairs
    pub fn with_points<S: Into<String>>(
        name: impl Into<String>,
        points: impl IntoIterator<Item = (S, f64)>,
    ) -> Result<Self> {
        let mut chart = Self::new(name);
        for (point_name, position) in points {
            chart.add_point(point_name, position)?;
        }
        Ok(chart)
    }

    /// Add a point. A point with the same name is replaced in place.
    ///
    /// Positions must be finite; they are normalized into `[0, 360)`.
    pub fn add_point(&mut self, name: impl Into<String>, position: f64) -> Result<&Point> {
        let name = name.into();
        if !position.is_finite() {
            return Err(Error::InvalidInput(format!(
                "position of {} in chart {} must be a finite angle, got {}",
                name, self.handle.name, position
            )));
        }
        let point = Point {
            name,
            position: normalize_coordinate(position),
            chart: self.handle.clone(),
        };
        let slot = match self.points.iter().position(|p| p.name == point.name) {
            Some(existing) => {
                self.points[existing] = point;
                existing
            }
            None => {
                self.points.push(point);
                self.points.len() - 1
            }
        };
        Ok(&self.points[slot])
    }

    pub fn id(&self) -> ChartId {
        self.handle.id
    }

    pub fn name(&self) -> &str {
        &self.handle.name
    }

    pub fn handle(&self) -> &ChartHandle {
        &self.handle
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Look up a point by name
    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Anything that can be analysed: a single chart or a tuple of charts
pub trait ChartObject {
    fn name(&self) -> &str;

    /// Underlying charts in analysis order
    fn charts(&self) -> &[Chart];

    /// How many charts this object spans
    fn dimension(&self) -> usize {
        self.charts().len()
    }

    fn shortened_name(&self, limit: usize) -> String {
        shorten(self.name(), limit)
    }
}

impl ChartObject for Chart {
    fn name(&self) -> &str {
        Chart::name(self)
    }

    fn charts(&self) -> &[Chart] {
        std::slice::from_ref(self)
    }
}

/// Several charts analysed together
#[derive(Debug, Clone, Serialize)]
pub struct MultiChart {
    name: String,
    charts: Vec<Chart>,
}

impl MultiChart {
    pub fn new(name: impl Into<String>, charts: Vec<Chart>) -> Self {
        Self {
            name: name.into(),
            charts,
        }
    }

    /// Combine chart objects, titled after the charts they contain
    pub fn combine(objects: &[&dyn ChartObject]) -> Self {
        let charts: Vec<Chart> = objects
            .iter()
            .flat_map(|o| o.charts().iter().cloned())
            .collect();
        let title = format!(
            "Synastry: {}",
            charts
                .iter()
                .map(Chart::name)
                .collect::<Vec<_>>()
                .join(" + ")
        );
        Self::new(title, charts)
    }
}

impl ChartObject for MultiChart {
    fn name(&self) -> &str {
        &self.name
    }

    fn charts(&self) -> &[Chart] {
        &self.charts
    }
}

fn shorten(name: &str, limit: usize) -> String {
    if name.chars().count() <= limit {
        return name.to_string();
    }
    let mut short: String = name.chars().take(limit.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_replaces_same_name() {
        let mut chart = Chart::new("Natal");
        chart.add_point("Sun", 10.0).unwrap();
        chart.add_point("Moon", 20.0).unwrap();
        chart.add_point("Sun", 370.5).unwrap();

        assert_eq!(chart.len(), 2);
        assert_eq!(chart.points()[0].name(), "Sun");
        assert_eq!(chart.points()[0].position(), 10.5);
    }

    #[test]
    fn test_point_identity() {
        let a = Chart::with_points("A", [("Sun", 10.0)]).unwrap();
        let b = Chart::with_points("B", [("Sun", 10.0)]).unwrap();

        let sun_a = &a.points()[0];
        let sun_b = &b.points()[0];
        assert!(sun_a.is_same(&sun_a.clone()));
        assert_ne!(sun_a, sun_b);
        assert!(!sun_a.is_of_same_chart(sun_b));
    }

    #[test]
    fn test_point_arcs() {
        let chart = Chart::with_points("A", [("Sun", 350.0), ("Moon", 80.0)]).unwrap();
        let sun = chart.point("Sun").unwrap();
        let moon = chart.point("Moon").unwrap();
        assert_eq!(sun.arc_to(moon), 90.0);
        assert_eq!(sun.arc_in_harmonic(moon, 4), 0.0);
    }

    #[test]
    fn test_chart_object_dimension() {
        let a = Chart::new("Anna");
        let b = Chart::new("Boris");
        assert_eq!(a.dimension(), 1);

        let both = MultiChart::combine(&[&a, &b]);
        assert_eq!(both.dimension(), 2);
        assert_eq!(both.name(), "Synastry: Anna + Boris");
        assert_eq!(both.charts()[1].id(), b.id());
    }

    #[test]
    fn test_shortened_name() {
        let chart = Chart::new("Midsummer");
        assert_eq!(chart.shortened_name(4), "Mid…");
        assert_eq!(chart.shortened_name(20), "Midsummer");
    }

    #[test]
    fn test_chart_serializes_points() {
        let chart = Chart::with_points("Natal", [("Sun", 10.0)]).unwrap();
        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(value["handle"]["name"], "Natal");
        assert_eq!(value["points"][0]["name"], "Sun");
        assert_eq!(value["points"][0]["position"], 10.0);
    }

    #[test]
    fn test_zodiac_degree() {
        let chart = Chart::with_points("A", [("Sun", 42.5)]).unwrap();
        assert_eq!(chart.points()[0].zodiac_degree(), "♉12°30'");
    }

    #[test]
    fn test_sign_follows_rounded_degree() {
        // 29°59'59.64" is shown as 30°, which is the start of Taurus
        let chart = Chart::with_points("A", [("Sun", 29.9999), ("Moon", 359.99999)]).unwrap();
        let sun = &chart.points()[0];
        assert_eq!(sun.zodiac_sign(), ZodiacSign::Taurus);
        assert_eq!(sun.zodiac_degree(), "♉0°");
        assert_eq!(sun.label(), "Sun ♉0°");

        let moon = &chart.points()[1];
        assert_eq!(moon.zodiac_sign(), ZodiacSign::Aries);
        assert_eq!(moon.zodiac_degree(), "♈0°");
    }

    #[test]
    fn test_non_finite_position_rejected() {
        assert!(matches!(
            Chart::with_points("N", [("X", f64::NAN), ("Y", 10.0)]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Chart::with_points("N", [("X", f64::INFINITY)]),
            Err(Error::InvalidInput(_))
        ));

        let mut chart = Chart::new("N");
        chart.add_point("Sun", 10.0).unwrap();
        assert!(matches!(
            chart.add_point("Moon", f64::NEG_INFINITY),
            Err(Error::InvalidInput(_))
        ));
        assert!(chart.add_point("Sun", f64::NAN).is_err());
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.points()[0].position(), 10.0);
    }
}
