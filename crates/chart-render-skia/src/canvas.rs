// File: crates/chart-render-skia/src/canvas.rs
// Summary: chart-core `Canvas` implemented on a Skia CPU raster surface.

use chart_core::canvas::{Canvas, Stroke, TextAlign, TextMetrics, TextStyle};
use chart_core::{ChartError, Color, PointF, Rect, Result, Rgba, Size};
use skia_safe as skia;

use crate::text::TextShaper;

pub struct SkiaCanvas {
    surface: skia::Surface,
    size: Size,
    shaper: TextShaper,
}

fn sk_color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.alpha, c.color.r, c.color.g, c.color.b)
}

fn sk_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn oval(center: PointF, width: f32, height: f32) -> skia::Rect {
    skia::Rect::from_xywh(center.x - width / 2.0, center.y - height / 2.0, width, height)
}

fn fill_paint(fill: Rgba, anti_alias: bool) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(anti_alias);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(fill));
    paint
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(sk_color(stroke.color));
    if let Some((on, off)) = stroke.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    }
    paint
}

impl SkiaCanvas {
    pub fn new(size: Size, background: Color, shaper: TextShaper) -> Result<Self> {
        let (w, h) = (size.width() as i32, size.height() as i32);
        let surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| ChartError::Backend(format!("failed to create {w}x{h} raster surface")))?;
        let mut canvas = Self { surface, size, shaper };
        canvas.clear(background);
        Ok(canvas)
    }

    /// Unpremultiplied RGBA rows, top to bottom.
    pub fn read_rgba(&mut self) -> Result<Vec<u8>> {
        let (w, h) = (self.size.width() as usize, self.size.height() as usize);
        let info = skia::ImageInfo::new(
            (w as i32, h as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let mut pixels = vec![0u8; w * h * 4];
        if !self.surface.read_pixels(&info, &mut pixels, w * 4, (0, 0)) {
            return Err(ChartError::Backend("failed to read back surface pixels".to_string()));
        }
        Ok(pixels)
    }
}

impl TextMetrics for SkiaCanvas {
    fn text_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.shaper.measure_width(text, size, bold)
    }
}

impl Canvas for SkiaCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.surface.canvas().clear(sk_color(color.into()));
    }

    fn line(&mut self, from: PointF, to: PointF, stroke: &Stroke) {
        self.surface.canvas().draw_line((from.x, from.y), (to.x, to.y), &stroke_paint(stroke));
    }

    fn fill_rect(&mut self, rect: Rect, fill: Rgba) {
        self.surface.canvas().draw_rect(sk_rect(rect), &fill_paint(fill, false));
    }

    fn fill_ellipse(&mut self, center: PointF, width: f32, height: f32, fill: Rgba) {
        self.surface.canvas().draw_oval(oval(center, width, height), &fill_paint(fill, true));
    }

    fn stroke_ellipse(&mut self, center: PointF, width: f32, height: f32, stroke: &Stroke) {
        self.surface.canvas().draw_oval(oval(center, width, height), &stroke_paint(stroke));
    }

    fn fill_polygon(&mut self, points: &[PointF], fill: Rgba) {
        let Some((first, rest)) = points.split_first() else { return };
        let mut path = skia::Path::new();
        path.move_to((first.x, first.y));
        for p in rest {
            path.line_to((p.x, p.y));
        }
        path.close();
        self.surface.canvas().draw_path(&path, &fill_paint(fill, true));
    }

    fn fill_arc(&mut self, center: PointF, radius: f32, start_deg: f32, sweep_deg: f32, fill: Rgba) {
        // Skia measures clockwise from east on a y-down surface, as layout does.
        let bounds = oval(center, radius * 2.0, radius * 2.0);
        self.surface.canvas().draw_arc(bounds, start_deg, sweep_deg, true, &fill_paint(fill, true));
    }

    fn text(&mut self, text: &str, anchor: PointF, style: &TextStyle) {
        let mut paragraph = self.shaper.layout(text, style.size, sk_color(style.color.into()), style.bold);
        let width = paragraph.max_intrinsic_width();
        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let canvas = self.surface.canvas();
        canvas.save();
        canvas.translate((anchor.x, anchor.y));
        if style.angle != 0.0 {
            canvas.rotate(-style.angle, None);
        }
        paragraph.paint(canvas, (dx, 0.0));
        canvas.restore();
    }
}
