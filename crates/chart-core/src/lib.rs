// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the data model, scale, layout engine and renderer dispatch.

pub mod ascii;
pub mod canvas;
pub mod chart;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod options;
pub mod palette;
pub mod render;
pub mod scale;
pub mod types;

pub use ascii::TextRenderer;
pub use canvas::{ApproxMetrics, Backend, Canvas, Stroke, TextAlign, TextMetrics, TextStyle};
pub use chart::{running_totals, Chart, ChartType, DatasetKind, RASTER_RENDERER, TEXT_RENDERER};
pub use color::{Color, Rgba};
pub use config::{ChartConfig, DatasetConfig, PointConfig, PointsConfig};
pub use dataset::{AnyDataset, BubbleDataset, BubblePoint, DataPoint, Dataset, Point, StandardDataset};
pub use error::{ChartError, Result};
pub use geometry::{PointF, Rect};
pub use layout::Layout;
pub use options::{ChartOptions, ChartOptionsBuilder, ImageFormat, RendererOverride};
pub use palette::{ColorGroup, Palette};
pub use render::{GeometryRenderer, RenderOutput, Renderer, Renderers};
pub use scale::{BandScale, Scale, ValueScale};
pub use types::{Margin, Size};
