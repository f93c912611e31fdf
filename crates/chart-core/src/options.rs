// File: crates/chart-core/src/options.rs
// Summary: Immutable chart options built once through a builder, plus output format and renderer override.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::palette::Palette;
use crate::render::Renderer;
use crate::types::{Margin, Size};

/// Encodings a renderer may be asked to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Gif,
    Svg,
    Txt,
}

impl ImageFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
            ImageFormat::Svg => "svg",
            ImageFormat::Txt => "txt",
        }
    }

    pub const fn is_raster(self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Webp | ImageFormat::Gif)
    }

    /// Parse an identifier, falling back to PNG for anything unknown.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for ImageFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            "webp" => Ok(ImageFormat::Webp),
            "gif" => Ok(ImageFormat::Gif),
            "svg" => Ok(ImageFormat::Svg),
            "txt" | "text" => Ok(ImageFormat::Txt),
            other => Err(format!("unknown image format `{other}`")),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renderer chosen explicitly instead of the chart type's default.
#[derive(Clone)]
pub enum RendererOverride {
    Instance(Arc<dyn Renderer>),
    Id(String),
}

impl fmt::Debug for RendererOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererOverride::Instance(r) => f.debug_tuple("Instance").field(&r.id()).finish(),
            RendererOverride::Id(id) => f.debug_tuple("Id").field(id).finish(),
        }
    }
}

impl From<&str> for RendererOverride {
    fn from(id: &str) -> Self {
        RendererOverride::Id(id.to_string())
    }
}

impl From<Arc<dyn Renderer>> for RendererOverride {
    fn from(r: Arc<dyn Renderer>) -> Self {
        RendererOverride::Instance(r)
    }
}

#[derive(Clone, Debug)]
pub struct ChartOptions {
    size: Size,
    margin: Margin,
    background_color: Color,
    text_color: Color,
    grid_color: Color,
    axes_color: Color,
    title_font_size: u32,
    label_font_size: u32,
    labels_on_grid_color: Color,
    show_labels_on_grid: bool,
    label_x_angle: f32,
    image_format: ImageFormat,
    bubble_size_domain: RangeInclusive<f64>,
    radar_value_domain: RangeInclusive<f64>,
    renderer: Option<RendererOverride>,
}

impl ChartOptions {
    pub fn builder() -> ChartOptionsBuilder {
        ChartOptionsBuilder::default()
    }

    pub fn size(&self) -> Size { self.size }
    pub fn margin(&self) -> Margin { self.margin }
    pub fn background_color(&self) -> Color { self.background_color }
    pub fn text_color(&self) -> Color { self.text_color }
    pub fn grid_color(&self) -> Color { self.grid_color }
    pub fn axes_color(&self) -> Color { self.axes_color }
    pub fn title_font_size(&self) -> u32 { self.title_font_size }
    pub fn label_font_size(&self) -> u32 { self.label_font_size }
    pub fn labels_on_grid_color(&self) -> Color { self.labels_on_grid_color }
    pub fn show_labels_on_grid(&self) -> bool { self.show_labels_on_grid }
    pub fn label_x_angle(&self) -> f32 { self.label_x_angle }
    pub fn image_format(&self) -> ImageFormat { self.image_format }
    /// Input domain mapped onto the bubble radius range.
    pub fn bubble_size_domain(&self) -> RangeInclusive<f64> { self.bubble_size_domain.clone() }
    /// Value domain mapped from the radar center to its rim.
    pub fn radar_value_domain(&self) -> RangeInclusive<f64> { self.radar_value_domain.clone() }
    pub fn renderer(&self) -> Option<&RendererOverride> { self.renderer.as_ref() }

    /// The only field that stays mutable after construction.
    pub fn set_renderer(&mut self, renderer: impl Into<RendererOverride>) -> &mut Self {
        self.renderer = Some(renderer.into());
        self
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptionsBuilder::default().build()
    }
}

#[derive(Clone, Debug)]
pub struct ChartOptionsBuilder {
    size: Size,
    margin: Margin,
    background_color: Color,
    text_color: Color,
    grid_color: Color,
    axes_color: Color,
    title_font_size: u32,
    label_font_size: u32,
    labels_on_grid_color: Option<Color>,
    show_labels_on_grid: bool,
    label_x_angle: f32,
    image_format: ImageFormat,
    bubble_size_domain: RangeInclusive<f64>,
    radar_value_domain: RangeInclusive<f64>,
    renderer: Option<RendererOverride>,
}

impl Default for ChartOptionsBuilder {
    fn default() -> Self {
        Self {
            size: Size::default(),
            margin: Margin::default(),
            background_color: Palette::White.color(),
            text_color: Palette::Black.color(),
            grid_color: Palette::Secondary.color(),
            axes_color: Palette::Dark.color(),
            title_font_size: 12,
            label_font_size: 11,
            labels_on_grid_color: None,
            show_labels_on_grid: true,
            label_x_angle: 0.0,
            image_format: ImageFormat::Png,
            bubble_size_domain: 0.0..=100.0,
            radar_value_domain: 0.0..=100.0,
            renderer: None,
        }
    }
}

impl ChartOptionsBuilder {
    pub fn size(mut self, size: Size) -> Self { self.size = size; self }
    pub fn margin(mut self, margin: Margin) -> Self { self.margin = margin; self }
    pub fn background_color(mut self, c: impl Into<Color>) -> Self { self.background_color = c.into(); self }
    pub fn text_color(mut self, c: impl Into<Color>) -> Self { self.text_color = c.into(); self }
    pub fn grid_color(mut self, c: impl Into<Color>) -> Self { self.grid_color = c.into(); self }
    pub fn axes_color(mut self, c: impl Into<Color>) -> Self { self.axes_color = c.into(); self }
    pub fn title_font_size(mut self, px: u32) -> Self { self.title_font_size = px; self }
    pub fn label_font_size(mut self, px: u32) -> Self { self.label_font_size = px; self }
    /// Defaults to the text color when unset.
    pub fn labels_on_grid_color(mut self, c: impl Into<Color>) -> Self { self.labels_on_grid_color = Some(c.into()); self }
    pub fn show_labels_on_grid(mut self, show: bool) -> Self { self.show_labels_on_grid = show; self }
    pub fn label_x_angle(mut self, degrees: f32) -> Self { self.label_x_angle = degrees; self }
    pub fn image_format(mut self, format: ImageFormat) -> Self { self.image_format = format; self }
    pub fn bubble_size_domain(mut self, domain: RangeInclusive<f64>) -> Self { self.bubble_size_domain = domain; self }
    pub fn radar_value_domain(mut self, domain: RangeInclusive<f64>) -> Self { self.radar_value_domain = domain; self }
    pub fn renderer(mut self, renderer: impl Into<RendererOverride>) -> Self { self.renderer = Some(renderer.into()); self }

    pub fn build(self) -> ChartOptions {
        ChartOptions {
            size: self.size,
            margin: self.margin,
            background_color: self.background_color,
            text_color: self.text_color,
            grid_color: self.grid_color,
            axes_color: self.axes_color,
            title_font_size: self.title_font_size,
            label_font_size: self.label_font_size,
            labels_on_grid_color: self.labels_on_grid_color.unwrap_or(self.text_color),
            show_labels_on_grid: self.show_labels_on_grid,
            label_x_angle: self.label_x_angle,
            image_format: self.image_format,
            bubble_size_domain: self.bubble_size_domain,
            radar_value_domain: self.radar_value_domain,
            renderer: self.renderer,
        }
    }
}
