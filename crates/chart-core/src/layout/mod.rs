// File: crates/chart-core/src/layout/mod.rs
// Summary: Backend-independent chart geometry, one layout family per topology.

pub mod cartesian;
pub mod frame;
pub mod polar;

use crate::canvas::{Canvas, TextMetrics};
use crate::chart::{Chart, ChartType};
use crate::error::Result;

pub use cartesian::{Bar, CartesianLayout, Dot, Polygon, Polyline};
pub use frame::{Decorations, Legend, LegendEntry, LegendMark, LineItem, Orientation, PlotFrame, TextItem};
pub use polar::{PieLayout, RadarLayout, RadarSeries, Slice};

/// Computed geometry for any chart type.
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    Cartesian(CartesianLayout),
    Pie(PieLayout),
    Radar(RadarLayout),
}

impl Layout {
    /// Compute geometry. `metrics` measures text where label extent drives placement.
    pub fn compute(chart: &Chart, metrics: &dyn TextMetrics) -> Result<Self> {
        Ok(match chart.chart_type() {
            ChartType::Pie | ChartType::Donut => Layout::Pie(PieLayout::compute(chart, metrics)?),
            ChartType::Radar => Layout::Radar(RadarLayout::compute(chart)?),
            _ => Layout::Cartesian(CartesianLayout::compute(chart)?),
        })
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        match self {
            Layout::Cartesian(l) => l.paint(canvas),
            Layout::Pie(l) => l.paint(canvas),
            Layout::Radar(l) => l.paint(canvas),
        }
    }
}
