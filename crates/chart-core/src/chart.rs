// File: crates/chart-core/src/chart.rs
// Summary: Chart model: topology tag, datasets, options, per-type scale derivation and render dispatch.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dataset::{AnyDataset, BubbleDataset, StandardDataset};
use crate::error::{ChartError, Result};
use crate::options::{ChartOptions, RendererOverride};
use crate::render::{RenderOutput, Renderer, Renderers};
use crate::scale::{Scale, DEFAULT_EXTRA};

/// Identifier of the raster renderer registered by the Skia backend.
pub const RASTER_RENDERER: &str = "raster";
/// Identifier of the character-cell renderer shipped with the core.
pub const TEXT_RENDERER: &str = "text";

/// Point representation a chart type expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Standard,
    Bubble,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatasetKind::Standard => "standard",
            DatasetKind::Bubble => "bubble",
        })
    }
}

/// The eleven chart topologies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Bar,
    HorizontalBar,
    StackedBar,
    Line,
    Area,
    Scatter,
    Bubble,
    Pie,
    Donut,
    Radar,
    Waterfall,
}

impl ChartType {
    pub const ALL: [ChartType; 11] = [
        ChartType::Bar,
        ChartType::HorizontalBar,
        ChartType::StackedBar,
        ChartType::Line,
        ChartType::Area,
        ChartType::Scatter,
        ChartType::Bubble,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::Radar,
        ChartType::Waterfall,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::HorizontalBar => "horizontal_bar",
            ChartType::StackedBar => "stacked_bar",
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
            ChartType::Bubble => "bubble",
            ChartType::Pie => "pie",
            ChartType::Donut => "donut",
            ChartType::Radar => "radar",
            ChartType::Waterfall => "waterfall",
        }
    }

    pub const fn dataset_kind(self) -> DatasetKind {
        match self {
            ChartType::Bubble => DatasetKind::Bubble,
            _ => DatasetKind::Standard,
        }
    }

    pub const fn default_renderer(self) -> &'static str {
        match self {
            ChartType::Bar
            | ChartType::HorizontalBar
            | ChartType::StackedBar
            | ChartType::Line
            | ChartType::Area
            | ChartType::Scatter
            | ChartType::Bubble
            | ChartType::Pie
            | ChartType::Donut
            | ChartType::Radar
            | ChartType::Waterfall => RASTER_RENDERER,
        }
    }

    /// Pie, donut and radar: no value axis.
    pub const fn is_polar(self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Donut | ChartType::Radar)
    }

    /// Parse an identifier, falling back to `Bar` for anything unknown.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            warn!(chart_type = s, "unknown chart type, using bar");
            ChartType::Bar
        })
    }
}

impl FromStr for ChartType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown chart type `{s}`"))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    chart_type: ChartType,
    title: Option<String>,
    label_x: Option<String>,
    label_y: Option<String>,
    datasets: Vec<AnyDataset>,
    options: ChartOptions,
}

impl Chart {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            title: None,
            label_x: None,
            label_y: None,
            datasets: Vec::new(),
            options: ChartOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn chart_type(&self) -> ChartType { self.chart_type }
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
    pub fn label_x(&self) -> Option<&str> { self.label_x.as_deref() }
    pub fn label_y(&self) -> Option<&str> { self.label_y.as_deref() }
    pub fn datasets(&self) -> &[AnyDataset] { &self.datasets }
    pub fn options(&self) -> &ChartOptions { &self.options }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_label_x(&mut self, label: impl Into<String>) -> &mut Self {
        self.label_x = Some(label.into());
        self
    }

    pub fn set_label_y(&mut self, label: impl Into<String>) -> &mut Self {
        self.label_y = Some(label.into());
        self
    }

    pub fn set_options(&mut self, options: ChartOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn set_renderer(&mut self, renderer: impl Into<RendererOverride>) -> &mut Self {
        self.options.set_renderer(renderer);
        self
    }

    /// Append an empty dataset of the kind this chart type expects and return it.
    pub fn new_dataset(&mut self) -> &mut AnyDataset {
        self.datasets.push(AnyDataset::empty(self.chart_type.dataset_kind()));
        let last = self.datasets.len() - 1;
        &mut self.datasets[last]
    }

    /// Append a dataset; its kind must match the chart type.
    pub fn add_dataset(&mut self, dataset: impl Into<AnyDataset>) -> Result<&mut Self> {
        let dataset = dataset.into();
        let expected = self.chart_type.dataset_kind();
        if dataset.kind() != expected {
            return Err(ChartError::DatasetKind {
                chart_type: self.chart_type,
                expected,
                found: dataset.kind(),
            });
        }
        self.datasets.push(dataset);
        Ok(self)
    }

    pub fn add_standard(&mut self, dataset: StandardDataset) -> Result<&mut Self> {
        self.add_dataset(dataset)
    }

    pub fn add_bubble(&mut self, dataset: BubbleDataset) -> Result<&mut Self> {
        self.add_dataset(dataset)
    }

    /// Category labels: those of the first dataset, in order.
    pub fn categories(&self) -> Vec<&str> {
        self.datasets.first().map(AnyDataset::labels).unwrap_or_default()
    }

    pub fn category_count(&self) -> usize {
        self.datasets.first().map_or(0, AnyDataset::len)
    }

    /// Values the value axis has to cover for this chart type.
    ///
    /// Stacked bars contribute every partial sum of each category's stack,
    /// waterfalls their running totals (plus the zero baseline the first bar
    /// starts from), everything else the raw point values.
    pub fn scale_values(&self) -> Vec<f64> {
        match self.chart_type {
            ChartType::StackedBar => {
                let n = self.category_count();
                (0..n)
                    .flat_map(|i| running_totals(self.datasets.iter().filter_map(|d| d.point(i)).map(|p| p.value())))
                    .collect()
            }
            ChartType::Waterfall => {
                let mut values = vec![0.0];
                if let Some(first) = self.datasets.first() {
                    values.extend(running_totals(first.values()));
                }
                values
            }
            _ => self.datasets.iter().flat_map(|d| d.values()).collect(),
        }
    }

    pub fn scale(&self) -> Result<Scale> {
        self.scale_with(DEFAULT_EXTRA, 0)
    }

    pub fn scale_with(&self, extra: f64, decimals: u32) -> Result<Scale> {
        let values = self.scale_values();
        if values.is_empty() {
            return Err(ChartError::EmptyChart);
        }
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        Scale::new(max, min, extra, decimals)
    }

    /// Pre-render check: at least one dataset is required.
    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(ChartError::EmptyChart);
        }
        Ok(())
    }

    /// The override from options, if any, else the type's default from `registry`.
    pub fn renderer(&self, registry: &Renderers) -> Result<Arc<dyn Renderer>> {
        match self.options.renderer() {
            Some(RendererOverride::Instance(r)) => {
                debug!(chart_type = %self.chart_type, renderer = r.id(), "using renderer instance override");
                Ok(Arc::clone(r))
            }
            Some(RendererOverride::Id(id)) => {
                debug!(chart_type = %self.chart_type, renderer = %id, "using renderer id override");
                registry.get(id)
            }
            None => {
                let id = self.chart_type.default_renderer();
                debug!(chart_type = %self.chart_type, renderer = id, "using default renderer");
                registry.get(id)
            }
        }
    }

    pub fn render(&self, registry: &Renderers) -> Result<RenderOutput> {
        self.validate()?;
        self.renderer(registry)?.render(self)
    }
}

/// Cumulative sums starting from the first value itself.
pub fn running_totals(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values
        .into_iter()
        .scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}
