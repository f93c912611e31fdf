// File: crates/chart-core/src/error.rs
// Summary: Error type shared by model construction, scale derivation, layout and rendering.

use thiserror::Error;

use crate::chart::{ChartType, DatasetKind};
use crate::options::ImageFormat;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Malformed hex, channel out of range, or negation of a color outside the palette.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: i64, height: i64 },

    #[error("invalid scale: minimum {min} is not below maximum {max}")]
    InvalidScale { min: f64, max: f64 },

    #[error("output format {format} is not supported by the {backend} backend")]
    UnsupportedFormat { format: ImageFormat, backend: &'static str },

    #[error("the chart requires at least one dataset before it can be rendered")]
    EmptyChart,

    #[error("missing resource: {0}")]
    MissingResource(String),

    #[error("no renderer registered under id `{0}`")]
    UnknownRenderer(String),

    #[error("{chart_type} charts take {expected} datasets, got a {found} dataset")]
    DatasetKind { chart_type: ChartType, expected: DatasetKind, found: DatasetKind },

    #[error("renderer `{renderer}` cannot draw {chart_type} charts")]
    UnsupportedChart { renderer: String, chart_type: ChartType },

    #[error("invalid chart configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("backend failure: {0}")]
    Backend(String),
}
