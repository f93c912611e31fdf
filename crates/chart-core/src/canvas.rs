// File: crates/chart-core/src/canvas.rs
// Summary: Drawing capability consumed by the paint phase, and the backend that owns it.

use crate::color::{Color, Rgba};
use crate::error::Result;
use crate::geometry::{PointF, Rect};
use crate::options::ImageFormat;
use crate::types::Size;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub bold: bool,
    /// Counter-clockwise rotation in degrees around the anchor.
    pub angle: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self { size, color, align: TextAlign::Left, bold: false, angle: 0.0 }
    }
    pub fn align(mut self, align: TextAlign) -> Self { self.align = align; self }
    pub fn bold(mut self) -> Self { self.bold = true; self }
    pub fn angle(mut self, degrees: f32) -> Self { self.angle = degrees; self }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
    /// On/off dash lengths in pixels; `None` draws a solid line.
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub fn solid(color: impl Into<Rgba>) -> Self {
        Self { color: color.into(), width: 1.0, dash: None }
    }
    pub fn dashed(color: impl Into<Rgba>, on: f32, off: f32) -> Self {
        Self { color: color.into(), width: 1.0, dash: Some((on, off)) }
    }
}

/// Width estimation for text, needed where layout depends on label extent.
pub trait TextMetrics {
    fn text_width(&self, text: &str, size: f32, bold: bool) -> f32;
}

/// Average-advance estimate used when no font is at hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMetrics;

impl TextMetrics for ApproxMetrics {
    fn text_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        let advance = if bold { 0.62 } else { 0.55 };
        text.chars().count() as f32 * size * advance
    }
}

/// 2-D drawing surface. Text anchors are the top of the text box; `align`
/// decides whether the anchor is its left edge, center or right edge.
pub trait Canvas: TextMetrics {
    fn size(&self) -> Size;
    fn clear(&mut self, color: Color);
    fn line(&mut self, from: PointF, to: PointF, stroke: &Stroke);
    fn fill_rect(&mut self, rect: Rect, fill: Rgba);
    /// Ellipse inscribed in a `width` x `height` box centered on `center`.
    fn fill_ellipse(&mut self, center: PointF, width: f32, height: f32, fill: Rgba);
    fn stroke_ellipse(&mut self, center: PointF, width: f32, height: f32, stroke: &Stroke);
    fn fill_polygon(&mut self, points: &[PointF], fill: Rgba);
    /// Pie sector from `start_deg` sweeping `sweep_deg` clockwise (0 = east).
    fn fill_arc(&mut self, center: PointF, radius: f32, start_deg: f32, sweep_deg: f32, fill: Rgba);
    fn text(&mut self, text: &str, anchor: PointF, style: &TextStyle);
}

/// Owner of drawing resources for one render call.
pub trait Backend: Send + Sync {
    type Surface: Canvas;

    fn name(&self) -> &'static str;
    fn supports(&self, format: ImageFormat) -> bool;
    fn create(&self, size: Size, background: Color) -> Result<Self::Surface>;
    /// Consumes the surface; its buffer is released on every path.
    fn encode(&self, surface: Self::Surface, format: ImageFormat) -> Result<Vec<u8>>;
}

pub mod recording {
    //! Canvas that records draw calls instead of rasterizing them.

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Clear(Color),
        Line(PointF, PointF, Stroke),
        Rect(Rect, Rgba),
        Ellipse(PointF, f32, f32, Rgba),
        EllipseOutline(PointF, f32, f32, Stroke),
        Polygon(Vec<PointF>, Rgba),
        Arc(PointF, f32, f32, f32, Rgba),
        Text(String, PointF, TextStyle),
    }

    pub struct RecordingCanvas {
        pub size: Size,
        pub ops: Vec<Op>,
    }

    impl RecordingCanvas {
        pub fn new(size: Size) -> Self {
            Self { size, ops: Vec::new() }
        }

        pub fn into_ops(self) -> Vec<Op> {
            self.ops
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(t, ..) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl TextMetrics for RecordingCanvas {
        fn text_width(&self, text: &str, size: f32, bold: bool) -> f32 {
            ApproxMetrics.text_width(text, size, bold)
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> Size { self.size }
        fn clear(&mut self, color: Color) { self.ops.push(Op::Clear(color)); }
        fn line(&mut self, from: PointF, to: PointF, stroke: &Stroke) { self.ops.push(Op::Line(from, to, *stroke)); }
        fn fill_rect(&mut self, rect: Rect, fill: Rgba) { self.ops.push(Op::Rect(rect, fill)); }
        fn fill_ellipse(&mut self, c: PointF, w: f32, h: f32, fill: Rgba) { self.ops.push(Op::Ellipse(c, w, h, fill)); }
        fn stroke_ellipse(&mut self, c: PointF, w: f32, h: f32, s: &Stroke) { self.ops.push(Op::EllipseOutline(c, w, h, *s)); }
        fn fill_polygon(&mut self, points: &[PointF], fill: Rgba) { self.ops.push(Op::Polygon(points.to_vec(), fill)); }
        fn fill_arc(&mut self, c: PointF, r: f32, start: f32, sweep: f32, fill: Rgba) { self.ops.push(Op::Arc(c, r, start, sweep, fill)); }
        fn text(&mut self, text: &str, anchor: PointF, style: &TextStyle) { self.ops.push(Op::Text(text.to_string(), anchor, *style)); }
    }
}
