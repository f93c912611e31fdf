// File: crates/chart-core/src/layout/cartesian.rs
// Summary: Grid-chart layouts: grouped, horizontal and stacked bars, line, area, scatter, bubble, waterfall.
// Notes:
// - Categories come from the first dataset; points past that count are dropped.
// - Per-point value labels are emitted only for single-dataset charts.

use tracing::{debug, trace};

use crate::canvas::{Canvas, Stroke, TextAlign, TextStyle};
use crate::chart::{running_totals, Chart, ChartType};
use crate::color::{Color, Rgba};
use crate::dataset::AnyDataset;
use crate::error::{ChartError, Result};
use crate::format;
use crate::geometry::{PointF, Rect};
use crate::layout::frame::{self, Decorations, Legend, Orientation, PlotFrame, TextItem};
use crate::scale::{BandScale, Scale, ValueScale};

/// Line and area vertex dot diameter.
pub const LINE_DOT: f32 = 6.0;
/// Scatter dot diameter.
pub const SCATTER_DOT: f32 = 8.0;
/// Area fill transparency (0 opaque .. 127 transparent).
pub const AREA_TRANSPARENCY: u8 = 80;
/// Bubble fill transparency (0 opaque .. 127 transparent).
pub const BUBBLE_TRANSPARENCY: u8 = 50;
/// Bubble diameter range in pixels.
pub const BUBBLE_DIAMETER: (f32, f32) = (10.0, 50.0);
/// Stacked bar width and left padding as slot fractions.
pub const STACK_WIDTH: f32 = 0.8;
pub const STACK_PADDING: f32 = 0.1;
/// Waterfall bar width and spacing as slot fractions.
pub const WATERFALL_WIDTH: f32 = 0.6;
pub const WATERFALL_SPACING: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub dataset: usize,
    pub index: usize,
    pub rect: Rect,
    pub fill: Rgba,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub dataset: usize,
    pub points: Vec<PointF>,
    pub stroke: Stroke,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub dataset: usize,
    pub points: Vec<PointF>,
    pub fill: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub dataset: usize,
    pub index: usize,
    pub center: PointF,
    pub diameter: f32,
    pub fill: Rgba,
    pub outline: Option<Stroke>,
}

impl Dot {
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_ellipse(self.center, self.diameter, self.diameter, self.fill);
        if let Some(outline) = &self.outline {
            canvas.stroke_ellipse(self.center, self.diameter, self.diameter, outline);
        }
    }
}

/// Geometry for one grid chart.
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianLayout {
    pub chart_type: ChartType,
    pub frame: PlotFrame,
    pub scale: Scale,
    pub decorations: Decorations,
    pub legend: Option<Legend>,
    pub bars: Vec<Bar>,
    pub areas: Vec<Polygon>,
    pub lines: Vec<Polyline>,
    pub dots: Vec<Dot>,
    pub value_labels: Vec<TextItem>,
}

impl CartesianLayout {
    pub fn compute(chart: &Chart) -> Result<Self> {
        chart.validate()?;
        let chart_type = chart.chart_type();
        if matches!(chart_type, ChartType::Pie | ChartType::Donut | ChartType::Radar) {
            return Err(not_cartesian(chart_type));
        }
        let orientation = match chart_type {
            ChartType::HorizontalBar => Orientation::Horizontal,
            _ => Orientation::Vertical,
        };
        let frame = PlotFrame::new(chart, orientation);
        let scale = chart.scale()?;
        let categories = chart.categories();
        let mut layout = Self {
            chart_type,
            frame,
            scale,
            decorations: frame::decorations(chart, &frame, &scale, &categories),
            legend: None,
            bars: Vec::new(),
            areas: Vec::new(),
            lines: Vec::new(),
            dots: Vec::new(),
            value_labels: Vec::new(),
        };

        let ctx = Ctx::new(chart, &frame, &scale);
        match chart_type {
            ChartType::Bar | ChartType::HorizontalBar => layout.grouped_bars(&ctx),
            ChartType::StackedBar => layout.stacked_bars(&ctx),
            ChartType::Line => layout.lines(&ctx, false),
            ChartType::Area => layout.lines(&ctx, true),
            ChartType::Scatter => layout.scatter(&ctx),
            ChartType::Bubble => layout.bubbles(&ctx)?,
            ChartType::Waterfall => layout.waterfall(&ctx)?,
            ChartType::Pie | ChartType::Donut | ChartType::Radar => return Err(not_cartesian(chart_type)),
        }

        let always = matches!(chart_type, ChartType::Bar | ChartType::HorizontalBar | ChartType::Line | ChartType::Area);
        let multi = matches!(chart_type, ChartType::StackedBar | ChartType::Scatter | ChartType::Bubble);
        if always || (multi && ctx.dataset_count > 1) {
            layout.legend = Some(frame::series_legend(chart));
        }

        debug!(
            chart_type = %chart_type,
            bars = layout.bars.len(),
            lines = layout.lines.len(),
            dots = layout.dots.len(),
            labels = layout.value_labels.len(),
            "cartesian layout"
        );
        Ok(layout)
    }

    fn grouped_bars(&mut self, ctx: &Ctx<'_>) {
        let n = ctx.dataset_count;
        let orientation = self.frame.orientation;
        let baseline = ctx.values.to_px(ctx.baseline_value());
        for (j, ds) in ctx.chart.datasets().iter().enumerate() {
            for (i, point) in ctx.points(ds) {
                let (start, thickness) = ctx.bands.grouped(i, j, n);
                let end = ctx.values.to_px(point.value());
                let rect = match orientation {
                    Orientation::Vertical => Rect::from_x_span(start, start + thickness, baseline, end),
                    Orientation::Horizontal => Rect::from_x_span(baseline.min(end), baseline.max(end), start, start + thickness),
                };
                self.bars.push(Bar {
                    dataset: j,
                    index: i,
                    rect,
                    fill: Rgba::from(point.color().unwrap_or(ds.color())),
                    value: point.value(),
                });
                if ctx.show_point_labels() {
                    let text = format::integer(point.value());
                    let item = match orientation {
                        Orientation::Vertical => TextItem::new(
                            text,
                            PointF::new(start + thickness / 2.0, (end - ctx.font * 1.5).round()),
                            ctx.label_style(TextAlign::Center),
                        ),
                        Orientation::Horizontal => TextItem::new(
                            text,
                            PointF::new(end.max(baseline) + 5.0, (start + thickness / 2.0 - ctx.font / 2.0).round()),
                            ctx.label_style(TextAlign::Left),
                        ),
                    };
                    self.value_labels.push(item);
                }
            }
        }
    }

    fn stacked_bars(&mut self, ctx: &Ctx<'_>) {
        for i in 0..ctx.count {
            let x = ctx.bands.slot_start(i) + ctx.bands.slot * STACK_PADDING;
            let width = ctx.bands.slot * STACK_WIDTH;
            let mut running = ctx.baseline_value();
            for (j, ds) in ctx.chart.datasets().iter().enumerate() {
                let Some(point) = ds.point(i) else { continue };
                let base = ctx.values.to_px(running);
                let top = ctx.values.to_px(running + point.value());
                let height = (base - top).abs();
                let rect = Rect::from_x_span(x, x + width, base, top);
                self.bars.push(Bar {
                    dataset: j,
                    index: i,
                    rect,
                    fill: Rgba::from(point.color().unwrap_or(ds.color())),
                    value: point.value(),
                });
                if ctx.show_point_labels() && height > ctx.font * 1.5 {
                    self.value_labels.push(TextItem::new(
                        format::integer(point.value()),
                        PointF::new(x + width / 2.0, ((base + top) / 2.0).round()),
                        ctx.label_style(TextAlign::Center),
                    ));
                }
                running += point.value();
            }
        }
    }

    fn lines(&mut self, ctx: &Ctx<'_>, filled: bool) {
        let bottom = self.frame.plot.bottom;
        for (j, ds) in ctx.chart.datasets().iter().enumerate() {
            let color = ds.color();
            let vertices: Vec<(usize, PointF, f64)> = ctx
                .points(ds)
                .map(|(i, p)| (i, PointF::new(ctx.bands.center(i), ctx.values.to_px(p.value())), p.value()))
                .collect();
            let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else { continue };

            if filled {
                let mut polygon = Vec::with_capacity(vertices.len() + 2);
                polygon.push(PointF::new(first.1.x, bottom));
                polygon.extend(vertices.iter().map(|v| v.1));
                polygon.push(PointF::new(last.1.x, bottom));
                self.areas.push(Polygon { dataset: j, points: polygon, fill: Rgba::from_transparency(color, AREA_TRANSPARENCY) });
            }
            self.lines.push(Polyline { dataset: j, points: vertices.iter().map(|v| v.1).collect(), stroke: Stroke::solid(color) });
            for &(i, center, value) in &vertices {
                self.dots.push(Dot { dataset: j, index: i, center, diameter: LINE_DOT, fill: Rgba::from(color), outline: None });
                if ctx.show_point_labels() {
                    self.value_labels.push(ctx.label_above(center, ctx.font * 1.5, value));
                }
            }
        }
    }

    fn scatter(&mut self, ctx: &Ctx<'_>) {
        for (j, ds) in ctx.chart.datasets().iter().enumerate() {
            for (i, point) in ctx.points(ds) {
                let center = PointF::new(ctx.bands.center(i), ctx.values.to_px(point.value()));
                let color = point.color().unwrap_or(ds.color());
                self.dots.push(Dot { dataset: j, index: i, center, diameter: SCATTER_DOT, fill: Rgba::from(color), outline: None });
                if ctx.show_point_labels() {
                    self.value_labels.push(ctx.label_above(center, ctx.font * 1.5, point.value()));
                }
            }
        }
    }

    fn bubbles(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        let domain = ctx.chart.options().bubble_size_domain();
        let (lo, hi) = (*domain.start(), *domain.end());
        if !(hi > lo) {
            return Err(ChartError::InvalidScale { min: lo, max: hi });
        }
        for (j, ds) in ctx.chart.datasets().iter().enumerate() {
            let sizes = ds.sizes().unwrap_or_default();
            for (i, point) in ctx.points(ds) {
                let size = sizes.get(i).copied().unwrap_or(lo);
                let diameter = bubble_diameter(size, lo, hi);
                let center = PointF::new(ctx.bands.center(i), ctx.values.to_px(point.value()));
                let color = point.color().unwrap_or(ds.color());
                self.dots.push(Dot {
                    dataset: j,
                    index: i,
                    center,
                    diameter,
                    fill: Rgba::from_transparency(color, BUBBLE_TRANSPARENCY),
                    outline: Some(Stroke::solid(color)),
                });
                if ctx.show_point_labels() {
                    self.value_labels.push(ctx.label_above(center, diameter + ctx.font, point.value()));
                }
            }
        }
        Ok(())
    }

    fn waterfall(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        let Some(ds) = ctx.chart.datasets().first() else { return Err(ChartError::EmptyChart) };
        if ds.is_empty() {
            return Err(ChartError::EmptyChart);
        }
        let positive = ds.color();
        let negative = positive.negative()?;
        let width = ctx.bands.slot * WATERFALL_WIDTH;
        let spacing = ctx.bands.slot * WATERFALL_SPACING;
        let totals = running_totals(ds.values());

        let mut previous = 0.0;
        for (i, (point, &total)) in ds.points().zip(&totals).enumerate() {
            let x = self.frame.plot.left + i as f32 * (width + spacing) + spacing / 2.0;
            let start = ctx.values.to_px(previous);
            let end = ctx.values.to_px(total);
            let fill = if point.value() >= 0.0 { positive } else { negative };
            trace!(index = i, value = point.value(), total, "waterfall step");
            self.bars.push(Bar {
                dataset: 0,
                index: i,
                rect: Rect::from_x_span(x, x + width, start, end),
                fill: Rgba::from(fill),
                value: point.value(),
            });
            if ctx.show_labels {
                let y = if end < start { end - ctx.font * 2.0 } else { end + ctx.font };
                self.value_labels.push(TextItem::new(
                    format::integer(total),
                    PointF::new(x + width / 2.0, y.round()),
                    ctx.label_style(TextAlign::Center),
                ));
            }
            previous = total;
        }
        Ok(())
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(legend) = &self.legend {
            legend.paint(canvas);
        }
        self.decorations.paint(canvas);
        for area in &self.areas {
            canvas.fill_polygon(&area.points, area.fill);
        }
        for bar in &self.bars {
            canvas.fill_rect(bar.rect, bar.fill);
        }
        for line in &self.lines {
            for pair in line.points.windows(2) {
                canvas.line(pair[0], pair[1], &line.stroke);
            }
        }
        for dot in &self.dots {
            dot.paint(canvas);
        }
        for label in &self.value_labels {
            label.paint(canvas);
        }
    }
}

fn not_cartesian(chart_type: ChartType) -> ChartError {
    ChartError::UnsupportedChart { renderer: "cartesian layout".into(), chart_type }
}

/// Linear map of `size` from `[lo, hi]` onto the bubble diameter range.
pub fn bubble_diameter(size: f64, lo: f64, hi: f64) -> f32 {
    let (min_d, max_d) = BUBBLE_DIAMETER;
    let t = ((size - lo) / (hi - lo)) as f32;
    (min_d + t * (max_d - min_d)).round()
}

/// Per-layout values shared by the topology functions.
struct Ctx<'a> {
    chart: &'a Chart,
    values: ValueScale,
    bands: BandScale,
    scale: Scale,
    count: usize,
    dataset_count: usize,
    font: f32,
    show_labels: bool,
    label_color: Color,
}

impl<'a> Ctx<'a> {
    fn new(chart: &'a Chart, frame: &PlotFrame, scale: &Scale) -> Self {
        let opts = chart.options();
        let count = chart.category_count();
        Self {
            chart,
            values: frame.value_scale(scale),
            bands: frame.bands(count),
            scale: *scale,
            count,
            dataset_count: chart.datasets().len(),
            font: opts.label_font_size() as f32,
            show_labels: opts.show_labels_on_grid(),
            label_color: opts.labels_on_grid_color(),
        }
    }

    /// Points that fall on a category slot, with their slot index.
    fn points<'d>(&self, ds: &'d AnyDataset) -> impl Iterator<Item = (usize, &'d crate::dataset::Point)> + 'd {
        let count = self.count;
        if ds.len() > count {
            trace!(extra = ds.len() - count, "points beyond the category count are dropped");
        }
        ds.points().take(count).enumerate()
    }

    fn show_point_labels(&self) -> bool {
        self.show_labels && self.dataset_count == 1
    }

    /// Value bars grow from: zero when inside the scale, else the nearest bound.
    fn baseline_value(&self) -> f64 {
        0.0f64.clamp(self.scale.min(), self.scale.max())
    }

    fn label_style(&self, align: TextAlign) -> TextStyle {
        TextStyle::new(self.font, self.label_color).align(align)
    }

    fn label_above(&self, at: PointF, offset: f32, value: f64) -> TextItem {
        TextItem::new(
            format::integer(value),
            PointF::new(at.x, (at.y - offset).round()),
            self.label_style(TextAlign::Center),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{BubbleDataset, StandardDataset};
    use crate::options::ChartOptions;
    use crate::palette::Palette;

    fn chart(t: ChartType, sets: &[&[(&str, f64)]]) -> Chart {
        let mut c = Chart::new(t);
        for (k, pairs) in sets.iter().enumerate() {
            let ds = StandardDataset::from_pairs(pairs.iter().map(|(l, v)| (*l, *v))).with_label(format!("s{k}"));
            c.add_dataset(ds).unwrap();
        }
        c
    }

    #[test]
    fn single_bar_dataset_gets_value_labels_and_legend() {
        let c = chart(ChartType::Bar, &[&[("Jan", 10.0), ("Feb", 20.0), ("Mar", 5.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        assert_eq!(l.bars.len(), 3);
        assert_eq!(l.value_labels.len(), 3);
        assert_eq!(l.value_labels[1].text, "20");
        assert!(l.legend.is_some());
        // bars stand on the plot bottom
        assert!(l.bars.iter().all(|b| (b.rect.bottom - l.frame.plot.bottom).abs() < 1e-3));
    }

    #[test]
    fn grouped_bars_share_the_slot_side_by_side() {
        let c = chart(ChartType::Bar, &[&[("a", 1.0), ("b", 2.0)], &[("a", 3.0), ("b", 4.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        assert!(l.value_labels.is_empty());
        let slot = l.frame.plot.width() / 2.0;
        let (b0, b1) = (l.bars[0].rect, l.bars[2].rect);
        assert!((b0.width() - slot * 0.4).abs() < 1e-3);
        assert!((b1.left - b0.right).abs() < 1e-3);
        assert!((b0.left - (l.frame.plot.left + slot * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn horizontal_bars_grow_right_from_left_axis() {
        let c = chart(ChartType::HorizontalBar, &[&[("a", 10.0), ("b", 20.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        assert_eq!(l.frame.orientation, Orientation::Horizontal);
        assert!(l.bars.iter().all(|b| (b.rect.left - l.frame.plot.left).abs() < 1e-3));
        assert!(l.bars[1].rect.width() > l.bars[0].rect.width());
        assert_eq!(l.value_labels[0].style.align, TextAlign::Left);
    }

    #[test]
    fn stacked_heights_sum_to_mapped_total() {
        let c = chart(
            ChartType::StackedBar,
            &[&[("a", 10.0), ("b", 20.0)], &[("a", 30.0), ("b", 5.0)], &[("a", 7.0), ("b", 8.0)]],
        );
        let l = CartesianLayout::compute(&c).unwrap();
        let vs = l.frame.value_scale(&l.scale);
        for (i, total) in [47.0, 33.0].into_iter().enumerate() {
            let sum: f32 = l.bars.iter().filter(|b| b.index == i).map(|b| b.rect.height()).sum();
            assert!((sum - (vs.to_px(0.0) - vs.to_px(total))).abs() < 1e-2, "category {i}: {sum}");
        }
        assert!(l.legend.is_some());
        assert!(l.value_labels.is_empty());
    }

    #[test]
    fn stacked_single_dataset_has_no_legend() {
        let c = chart(ChartType::StackedBar, &[&[("a", 10.0), ("b", 40.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        assert!(l.legend.is_none());
        assert_eq!(l.value_labels.len(), 2);
    }

    #[test]
    fn stacked_negative_segments_follow_the_value_map() {
        let c = chart(ChartType::StackedBar, &[&[("a", 20.0), ("b", -5.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        assert!(l.scale.min() < 0.0);
        let vs = l.frame.value_scale(&l.scale);
        let (a, b) = (l.bars[0].rect, l.bars[1].rect);
        assert!((a.top - vs.to_px(20.0)).abs() < 1e-3 && (a.bottom - vs.to_px(0.0)).abs() < 1e-3);
        assert!((b.top - vs.to_px(0.0)).abs() < 1e-3 && (b.bottom - vs.to_px(-5.0)).abs() < 1e-3);
        assert!(b.bottom < l.frame.plot.bottom);
    }

    #[test]
    fn mixed_sign_stack_stays_inside_the_plot() {
        let c = chart(ChartType::StackedBar, &[&[("a", 10.0), ("b", 20.0)], &[("a", -25.0), ("b", 5.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        let vs = l.frame.value_scale(&l.scale);
        let second = l.bars.iter().find(|b| b.index == 0 && b.dataset == 1).unwrap().rect;
        assert!((second.top - vs.to_px(10.0)).abs() < 1e-3);
        assert!((second.bottom - vs.to_px(-15.0)).abs() < 1e-3);
        let plot = l.frame.plot;
        assert!(l.bars.iter().all(|b| b.rect.top >= plot.top - 1e-3 && b.rect.bottom <= plot.bottom + 1e-3));
    }

    #[test]
    fn area_polygon_closes_on_baseline() {
        let c = chart(ChartType::Area, &[&[("a", 10.0), ("b", 20.0), ("c", 15.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        let poly = &l.areas[0].points;
        assert_eq!(poly.len(), 5);
        assert_eq!(poly[0].y, l.frame.plot.bottom);
        assert_eq!(poly[4].y, l.frame.plot.bottom);
        assert_eq!(poly[0].x, poly[1].x);
        assert_eq!(l.lines[0].points.len(), 3);
        assert_eq!(l.areas[0].fill.alpha, 94);
    }

    #[test]
    fn scatter_uses_larger_dots_and_legend_only_for_many() {
        let c = chart(ChartType::Scatter, &[&[("a", 10.0), ("b", 20.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        assert!(l.dots.iter().all(|d| d.diameter == SCATTER_DOT));
        assert!(l.legend.is_none());
    }

    #[test]
    fn bubble_diameter_follows_size_domain() {
        let mut c = Chart::new(ChartType::Bubble);
        c.add_dataset(BubbleDataset::from_triples([("a", 10.0, 0.0), ("b", 20.0, 50.0), ("c", 30.0, 100.0)])).unwrap();
        let l = CartesianLayout::compute(&c).unwrap();
        let d: Vec<f32> = l.dots.iter().map(|d| d.diameter).collect();
        assert_eq!(d, vec![10.0, 30.0, 50.0]);
        assert!(l.dots[0].outline.is_some());

        let c = c.with_options(ChartOptions::builder().bubble_size_domain(0.0..=200.0).build());
        let l = CartesianLayout::compute(&c).unwrap();
        assert_eq!(l.dots[2].diameter, 30.0);
    }

    #[test]
    fn waterfall_bars_follow_running_totals() {
        let mut c = chart(ChartType::Waterfall, &[&[("a", 10.0), ("b", -3.0), ("c", 5.0)]]);
        let l = CartesianLayout::compute(&c).unwrap();
        let vs = l.frame.value_scale(&l.scale);
        let spans = [(0.0, 10.0), (10.0, 7.0), (7.0, 12.0)];
        for (bar, (from, to)) in l.bars.iter().zip(spans) {
            assert!((bar.rect.top - vs.to_px(from).min(vs.to_px(to))).abs() < 1e-3);
            assert!((bar.rect.bottom - vs.to_px(from).max(vs.to_px(to))).abs() < 1e-3);
        }
        let labels: Vec<_> = l.value_labels.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, vec!["10", "7", "12"]);
        assert_eq!(l.bars[1].fill.color, Palette::RichBlue.negative().color());
        assert_eq!(l.bars[0].fill.color, Palette::RichBlue.color());

        c.set_options(ChartOptions::builder().show_labels_on_grid(false).build());
        assert!(CartesianLayout::compute(&c).unwrap().value_labels.is_empty());
    }

    #[test]
    fn waterfall_with_non_palette_color_fails() {
        let mut c = Chart::new(ChartType::Waterfall);
        c.add_dataset(StandardDataset::from_pairs([("a", 1.0), ("b", 2.0)]).with_color(Color::rgb(1, 2, 3))).unwrap();
        assert!(matches!(CartesianLayout::compute(&c), Err(ChartError::InvalidColor(_))));
    }

    #[test]
    fn polar_types_are_rejected() {
        for t in [ChartType::Pie, ChartType::Donut, ChartType::Radar] {
            let c = chart(t, &[&[("a", 1.0)]]);
            assert!(matches!(CartesianLayout::compute(&c), Err(ChartError::UnsupportedChart { .. })), "{t}");
        }
    }
}
