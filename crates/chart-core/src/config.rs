// File: crates/chart-core/src/config.rs
// Summary: Declarative chart construction from a nested (JSON-shaped) configuration.
// Notes:
// - Point maps keep insertion order; that order is the category order.
// - An unknown or missing `type` falls back to a bar chart.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::Deserialize;
use tracing::debug;

use crate::chart::{Chart, ChartType, DatasetKind};
use crate::color::Color;
use crate::dataset::{AnyDataset, BubbleDataset, StandardDataset};
use crate::error::{ChartError, Result};
use crate::options::ChartOptions;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    pub title: Option<String>,
    pub label_x: Option<String>,
    pub label_y: Option<String>,
    pub datasets: Vec<DatasetConfig>,
    #[serde(skip)]
    pub options: Option<ChartOptions>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub label: Option<String>,
    pub color: Option<Color>,
    pub points: PointsConfig,
}

/// Points keyed by category label, or a list of self-labelled points.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PointsConfig {
    Map(IndexMap<String, PointConfig>),
    List(Vec<LabeledPoint>),
}

impl Default for PointsConfig {
    fn default() -> Self {
        PointsConfig::Map(IndexMap::new())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LabeledPoint {
    pub label: String,
    #[serde(flatten)]
    pub point: PointConfig,
}

/// One point: `12`, `[12, 30]`, `{"value": 12, "color": "#ff0000"}` or `{"value": 12, "size": 30}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointConfig {
    Value(f64),
    Bubble([f64; 2]),
    Detailed {
        value: f64,
        #[serde(default)]
        size: Option<f64>,
        #[serde(default)]
        color: Option<Color>,
    },
}

impl PointConfig {
    pub fn value(&self) -> f64 {
        match self {
            PointConfig::Value(v) => *v,
            PointConfig::Bubble([v, _]) => *v,
            PointConfig::Detailed { value, .. } => *value,
        }
    }

    pub fn size(&self) -> Option<f64> {
        match self {
            PointConfig::Value(_) => None,
            PointConfig::Bubble([_, s]) => Some(*s),
            PointConfig::Detailed { size, .. } => *size,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            PointConfig::Detailed { color, .. } => *color,
            _ => None,
        }
    }
}

impl PointsConfig {
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &PointConfig)> + '_> {
        match self {
            PointsConfig::Map(m) => Box::new(m.iter().map(|(k, p)| (k.as_str(), p))),
            PointsConfig::List(l) => Box::new(l.iter().map(|lp| (lp.label.as_str(), &lp.point))),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type.as_deref().map_or(ChartType::Bar, ChartType::parse_or_default)
    }
}

impl DatasetConfig {
    /// Build the dataset variant `kind` calls for. Bubble points must carry a size.
    pub fn build(&self, kind: DatasetKind) -> Result<AnyDataset> {
        let mut ds = AnyDataset::empty(kind);
        match &mut ds {
            AnyDataset::Standard(d) => fill_standard(d, self),
            AnyDataset::Bubble(d) => fill_bubble(d, self)?,
        }
        Ok(ds)
    }
}

fn fill_standard(d: &mut StandardDataset, cfg: &DatasetConfig) {
    if let Some(label) = &cfg.label {
        d.set_label(label.as_str());
    }
    if let Some(color) = cfg.color {
        d.set_color(color);
    }
    for (label, p) in cfg.points.iter() {
        d.add_point(label, p.value(), p.color());
    }
}

fn fill_bubble(d: &mut BubbleDataset, cfg: &DatasetConfig) -> Result<()> {
    if let Some(label) = &cfg.label {
        d.set_label(label.as_str());
    }
    if let Some(color) = cfg.color {
        d.set_color(color);
    }
    for (label, p) in cfg.points.iter() {
        let size = p.size().ok_or_else(|| {
            ChartError::InvalidConfig(serde_json::Error::custom(format!("bubble point `{label}` has no size")))
        })?;
        d.add_point(label, p.value(), size, p.color());
    }
    Ok(())
}

impl Chart {
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        let chart_type = config.chart_type();
        let mut chart = Chart::new(chart_type);
        if let Some(title) = config.title.as_deref().filter(|t| !t.is_empty()) {
            chart.set_title(title);
        }
        if let Some(label) = config.label_x.as_deref().filter(|t| !t.is_empty()) {
            chart.set_label_x(label);
        }
        if let Some(label) = config.label_y.as_deref().filter(|t| !t.is_empty()) {
            chart.set_label_y(label);
        }
        for ds in &config.datasets {
            chart.add_dataset(ds.build(chart_type.dataset_kind())?)?;
        }
        if let Some(options) = &config.options {
            chart.set_options(options.clone());
        }
        debug!(%chart_type, datasets = config.datasets.len(), "built chart from config");
        Ok(chart)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(&ChartConfig::from_json(json)?)
    }
}
