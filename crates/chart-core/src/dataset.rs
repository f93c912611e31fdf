// File: crates/chart-core/src/dataset.rs
// Summary: Point and dataset model for standard and bubble series.
// Notes:
// - Insertion order of points is the category order on the X axis.
// - Lookup by label is a linear scan, first match wins.

use crate::chart::DatasetKind;
use crate::color::Color;

/// Labeled value with an optional color override.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    label: String,
    value: f64,
    color: Option<Color>,
}

impl Point {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value, color: None }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn value(&self) -> f64 { self.value }
    pub fn color(&self) -> Option<Color> { self.color }
}

/// Point whose `size` drives the bubble radius.
#[derive(Clone, Debug, PartialEq)]
pub struct BubblePoint {
    point: Point,
    size: f64,
}

impl BubblePoint {
    pub fn new(label: impl Into<String>, value: f64, size: f64) -> Self {
        Self { point: Point::new(label, value), size }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.point = self.point.with_color(color);
        self
    }

    pub fn size(&self) -> f64 { self.size }
}

/// Shared read access used by layout code regardless of the dataset variant.
pub trait DataPoint: Clone {
    fn point(&self) -> &Point;
}

impl DataPoint for Point {
    fn point(&self) -> &Point { self }
}

impl DataPoint for BubblePoint {
    fn point(&self) -> &Point { &self.point }
}

/// Ordered series of points sharing a legend label and default color.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<P: DataPoint = Point> {
    label: Option<String>,
    color: Color,
    points: Vec<P>,
}

pub type StandardDataset = Dataset<Point>;
pub type BubbleDataset = Dataset<BubblePoint>;

impl<P: DataPoint> Dataset<P> {
    pub fn new() -> Self {
        Self { label: None, color: Color::default(), points: Vec::new() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
    pub fn color(&self) -> Color { self.color }
    pub fn points(&self) -> &[P] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Category labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.point().label()).collect()
    }

    pub fn find_point_by_label(&self, label: &str) -> Option<&P> {
        self.points.iter().find(|p| p.point().label() == label)
    }

    pub fn push(&mut self, point: P) -> &mut Self {
        self.points.push(point);
        self
    }
}

impl<P: DataPoint> Default for Dataset<P> {
    fn default() -> Self { Self::new() }
}

impl StandardDataset {
    pub fn add_point(&mut self, label: impl Into<String>, value: f64, color: Option<Color>) -> &mut Self {
        let mut p = Point::new(label, value);
        if let Some(c) = color { p = p.with_color(c); }
        self.push(p)
    }

    /// Build from `(label, value)` pairs, keeping their order.
    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f64)>) -> Self {
        let mut ds = Self::new();
        for (label, value) in pairs { ds.add_point(label, value, None); }
        ds
    }
}

impl BubbleDataset {
    pub fn add_point(&mut self, label: impl Into<String>, value: f64, size: f64, color: Option<Color>) -> &mut Self {
        let mut p = BubblePoint::new(label, value, size);
        if let Some(c) = color { p = p.with_color(c); }
        self.push(p)
    }

    /// Build from `(label, value, size)` triples, keeping their order.
    pub fn from_triples<L: Into<String>>(triples: impl IntoIterator<Item = (L, f64, f64)>) -> Self {
        let mut ds = Self::new();
        for (label, value, size) in triples { ds.add_point(label, value, size, None); }
        ds
    }
}

/// A dataset of either variant, as held by a chart.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyDataset {
    Standard(StandardDataset),
    Bubble(BubbleDataset),
}

impl AnyDataset {
    pub fn empty(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Standard => AnyDataset::Standard(StandardDataset::new()),
            DatasetKind::Bubble => AnyDataset::Bubble(BubbleDataset::new()),
        }
    }

    pub fn kind(&self) -> DatasetKind {
        match self {
            AnyDataset::Standard(_) => DatasetKind::Standard,
            AnyDataset::Bubble(_) => DatasetKind::Bubble,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            AnyDataset::Standard(d) => d.label(),
            AnyDataset::Bubble(d) => d.label(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AnyDataset::Standard(d) => d.color(),
            AnyDataset::Bubble(d) => d.color(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyDataset::Standard(d) => d.len(),
            AnyDataset::Bubble(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The `i`-th point viewed as a plain point.
    pub fn point(&self, i: usize) -> Option<&Point> {
        match self {
            AnyDataset::Standard(d) => d.points().get(i),
            AnyDataset::Bubble(d) => d.points().get(i).map(DataPoint::point),
        }
    }

    pub fn points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        match self {
            AnyDataset::Standard(d) => Box::new(d.points().iter()),
            AnyDataset::Bubble(d) => Box::new(d.points().iter().map(DataPoint::point)),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points().map(Point::value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points().map(Point::label).collect()
    }

    pub fn find_point_by_label(&self, label: &str) -> Option<&Point> {
        self.points().find(|p| p.label() == label)
    }

    /// Bubble sizes in point order; `None` for standard datasets.
    pub fn sizes(&self) -> Option<Vec<f64>> {
        match self {
            AnyDataset::Standard(_) => None,
            AnyDataset::Bubble(d) => Some(d.points().iter().map(BubblePoint::size).collect()),
        }
    }

    pub fn as_standard_mut(&mut self) -> Option<&mut StandardDataset> {
        match self {
            AnyDataset::Standard(d) => Some(d),
            AnyDataset::Bubble(_) => None,
        }
    }

    pub fn as_bubble_mut(&mut self) -> Option<&mut BubbleDataset> {
        match self {
            AnyDataset::Bubble(d) => Some(d),
            AnyDataset::Standard(_) => None,
        }
    }
}

impl From<StandardDataset> for AnyDataset {
    fn from(d: StandardDataset) -> Self { AnyDataset::Standard(d) }
}

impl From<BubbleDataset> for AnyDataset {
    fn from(d: BubbleDataset) -> Self { AnyDataset::Bubble(d) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_keep_insertion_order() {
        let ds = StandardDataset::from_pairs([("Mar", 5.0), ("Jan", 10.0), ("Feb", 20.0)]);
        assert_eq!(ds.labels(), vec!["Mar", "Jan", "Feb"]);
    }

    #[test]
    fn lookup_by_label_returns_first_match() {
        let mut ds = StandardDataset::new();
        ds.add_point("A", 1.0, None).add_point("B", 2.0, None).add_point("A", 3.0, None);
        assert_eq!(ds.find_point_by_label("A").map(Point::value), Some(1.0));
        assert!(ds.find_point_by_label("Z").is_none());
    }

    #[test]
    fn bubble_dataset_exposes_sizes_and_plain_points() {
        let any: AnyDataset = BubbleDataset::from_triples([("x", 1.0, 20.0), ("y", 2.0, 80.0)]).into();
        assert_eq!(any.kind(), DatasetKind::Bubble);
        assert_eq!(any.sizes(), Some(vec![20.0, 80.0]));
        assert_eq!(any.point(1).map(Point::label), Some("y"));
        assert_eq!(any.values().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn default_dataset_color_is_rich_blue() {
        assert_eq!(StandardDataset::new().color(), crate::Palette::RichBlue.color());
    }
}
