// File: crates/chart-core/src/layout/polar.rs
// Summary: Circular layouts: pie and donut sectors with a side legend, radar axes and series polygons.

use tracing::debug;

use crate::canvas::{Canvas, Stroke, TextAlign, TextMetrics, TextStyle};
use crate::chart::{Chart, ChartType};
use crate::color::{Color, Rgba};
use crate::error::{ChartError, Result};
use crate::format;
use crate::geometry::{PointF, Rect};
use crate::layout::cartesian::{Dot, LINE_DOT};
use crate::layout::frame::{self, Legend, LegendEntry, LegendMark, LineItem, PlotFrame, TextItem};
use crate::palette::{ColorGroup, Palette};

/// Slices narrower than this many degrees get no percentage label.
pub const MIN_LABELED_SWEEP: f32 = 15.0;
/// Pie label distance as a fraction of the radius.
pub const PIE_LABEL_RADIUS: f32 = 0.6;
/// Donut cutout as a fraction of the outer radius.
pub const DONUT_INNER: f32 = 0.5;
/// Side legend color box size and the gap after it.
pub const LEGEND_BOX: f32 = 10.0;
pub const LEGEND_BOX_GAP: f32 = 5.0;

/// Concentric radar guide rings.
pub const RADAR_RINGS: usize = 4;
/// Radar radius divisor applied to the usable extent.
pub const RADAR_EXTENT: f32 = 2.5;
/// Radar ring dash: `on` degrees drawn out of every `period` degrees.
pub const RADAR_DASH: (u32, u32) = (3, 5);
const RADAR_RING_COLOR: Color = Color::rgb(200, 200, 200);
const RADAR_RING_TRANSPARENCY: u8 = 75;

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub start_deg: f32,
    pub sweep_deg: f32,
    pub color: Color,
    pub value: f64,
    /// Share of the total, formatted (`"33.3"`).
    pub percentage: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieLayout {
    pub title: Option<TextItem>,
    pub center: PointF,
    pub radius: f32,
    /// Donut cutout radius and fill.
    pub cutout: Option<(f32, Color)>,
    pub slices: Vec<Slice>,
    pub labels: Vec<TextItem>,
    pub legend: Legend,
}

impl PieLayout {
    pub fn compute(chart: &Chart, metrics: &dyn TextMetrics) -> Result<Self> {
        chart.validate()?;
        let donut = chart.chart_type() == ChartType::Donut;
        let opts = chart.options();
        let (size, m) = (opts.size(), opts.margin());
        let (w, h) = (size.width() as f32, size.height() as f32);
        let font = opts.label_font_size() as f32;
        let title_height = PlotFrame::title_height(chart);

        let ds = &chart.datasets()[0];
        let total: f64 = ds.values().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(ChartError::InvalidScale { min: 0.0, max: total });
        }

        let entries: Vec<(String, String)> = ds
            .points()
            .map(|p| {
                let pct = format::percentage(p.value(), total);
                (format!("{} ({pct}%)", p.label()), pct)
            })
            .collect();
        let text_width = entries
            .iter()
            .map(|(text, _)| metrics.text_width(text, font, false))
            .fold(0.0f32, f32::max);
        let legend_width = text_width + LEGEND_BOX + LEGEND_BOX_GAP;
        let legend_x = (w - legend_width - m.right as f32).floor();
        let pie_width = w - legend_width - m.right as f32;

        let center = PointF::new(
            (m.left as f32 + pie_width / 2.0).round(),
            ((h + title_height) / 2.0).round(),
        );
        let radius = f32::min(
            (pie_width - m.hsum() as f32) / 2.0,
            (h - m.vsum() as f32 - title_height * 3.0) / 2.0,
        )
        .max(0.0);
        let inner = donut.then(|| (radius * DONUT_INNER).round());
        let label_radius = match inner {
            Some(r) => (radius + r) / 2.0,
            None => radius * PIE_LABEL_RADIUS,
        };

        let label_style = TextStyle::new(font, opts.labels_on_grid_color()).align(TextAlign::Center);
        let legend_style = TextStyle::new(font, opts.text_color());
        let mut layout = Self {
            title: frame::title(chart),
            center,
            radius,
            cutout: inner.map(|r| (r, opts.background_color())),
            slices: Vec::with_capacity(ds.len()),
            labels: Vec::new(),
            legend: Legend::default(),
        };

        let mut start = 0.0f32;
        let mut fallback = 0usize;
        let mut legend_y = m.top as f32 + title_height * 3.0;
        for (i, (point, (legend_text, pct))) in ds.points().zip(entries).enumerate() {
            let sweep = (360.0 * point.value() / total) as f32;
            let color = point.color().unwrap_or_else(|| {
                let c = Palette::by_index(fallback, ColorGroup::Professional).color();
                fallback += 1;
                c
            });
            if sweep > MIN_LABELED_SWEEP {
                let at = center.polar(start + sweep / 2.0, label_radius);
                layout.labels.push(TextItem::new(format!("{pct}%"), PointF::new(at.x.round(), at.y.round()), label_style));
            }
            layout.legend.entries.push(LegendEntry {
                mark: LegendMark::Swatch { rect: Rect::from_ltwh(legend_x, legend_y, LEGEND_BOX, LEGEND_BOX), color },
                text: TextItem::new(legend_text, PointF::new(legend_x + LEGEND_BOX + LEGEND_BOX_GAP, legend_y), legend_style),
            });
            layout.slices.push(Slice { index: i, start_deg: start, sweep_deg: sweep, color, value: point.value(), percentage: pct });
            start += sweep;
            legend_y += font * 2.0;
        }
        debug!(slices = layout.slices.len(), radius, donut, "pie layout");
        Ok(layout)
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(title) = &self.title {
            title.paint(canvas);
        }
        for s in &self.slices {
            canvas.fill_arc(self.center, self.radius, s.start_deg, s.sweep_deg, Rgba::from(s.color));
        }
        if let Some((r, color)) = self.cutout {
            canvas.fill_ellipse(self.center, r * 2.0, r * 2.0, Rgba::from(color));
        }
        for label in &self.labels {
            label.paint(canvas);
        }
        self.legend.paint(canvas);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarSeries {
    pub dataset: usize,
    pub color: Color,
    /// Values aligned to the category axes.
    pub values: Vec<f64>,
    pub vertices: Vec<PointF>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarLayout {
    pub title: Option<TextItem>,
    pub center: PointF,
    pub radius: f32,
    pub categories: Vec<String>,
    pub rings: Vec<LineItem>,
    pub axes: Vec<LineItem>,
    pub axis_labels: Vec<TextItem>,
    pub series: Vec<RadarSeries>,
    pub dots: Vec<Dot>,
    pub legend: Option<Legend>,
}

impl RadarLayout {
    pub fn compute(chart: &Chart) -> Result<Self> {
        chart.validate()?;
        let opts = chart.options();
        let (size, m) = (opts.size(), opts.margin());
        let (w, h) = (size.width() as f32, size.height() as f32);
        let font = opts.label_font_size() as f32;
        let title_height = PlotFrame::title_height(chart);

        let categories: Vec<String> = chart.categories().into_iter().map(str::to_owned).collect();
        if categories.is_empty() {
            return Err(ChartError::EmptyChart);
        }
        let domain = opts.radar_value_domain();
        let (lo, hi) = (*domain.start(), *domain.end());
        if !(hi > lo) {
            return Err(ChartError::InvalidScale { min: lo, max: hi });
        }

        let center = PointF::new((w / 2.0).round(), ((h + title_height) / 2.0).round() + 10.0);
        let radius = f32::min(
            (w - m.hsum() as f32) / RADAR_EXTENT,
            (h - m.vsum() as f32 - title_height) / RADAR_EXTENT,
        )
        .max(0.0);
        let step = 360.0 / categories.len() as f32;

        let ring_stroke = Stroke::solid(Rgba::from_transparency(RADAR_RING_COLOR, RADAR_RING_TRANSPARENCY));
        let (on, period) = RADAR_DASH;
        let mut rings = Vec::new();
        for k in 1..=RADAR_RINGS {
            let r = radius * k as f32 / RADAR_RINGS as f32;
            for a in (0..360).step_by(period as usize) {
                rings.push(LineItem::new(center.polar(a as f32, r), center.polar((a + on) as f32, r), ring_stroke));
            }
        }

        let axis_stroke = Stroke::solid(opts.grid_color());
        let label_style = TextStyle::new(font, opts.text_color());
        let mut axes = Vec::with_capacity(categories.len());
        let mut axis_labels = Vec::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            let angle = i as f32 * step - 90.0;
            axes.push(LineItem::new(center, center.polar(angle, radius), axis_stroke));
            let end = center.polar(angle, radius + 5.0);
            let (anchor, align) = match axis_label_side(i as f32 * step) {
                LabelSide::Top => (PointF::new(end.x, end.y - font), TextAlign::Center),
                LabelSide::Bottom => (end, TextAlign::Center),
                LabelSide::Right => (PointF::new(end.x, end.y - font / 2.0), TextAlign::Left),
                LabelSide::Left => (PointF::new(end.x, end.y - font / 2.0), TextAlign::Right),
            };
            let anchor = PointF::new(anchor.x.round(), anchor.y.round());
            axis_labels.push(TextItem::new(category.as_str(), anchor, label_style.align(align)));
        }

        let mut series = Vec::with_capacity(chart.datasets().len());
        let mut dots = Vec::new();
        for (j, ds) in chart.datasets().iter().enumerate() {
            let values: Vec<f64> = categories
                .iter()
                .map(|c| ds.find_point_by_label(c).map_or(0.0, |p| p.value()))
                .collect();
            let vertices: Vec<PointF> = values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let distance = ((v - lo) / (hi - lo)) as f32 * radius;
                    center.polar(i as f32 * step - 90.0, distance)
                })
                .collect();
            for (i, &v) in vertices.iter().enumerate() {
                dots.push(Dot { dataset: j, index: i, center: v, diameter: LINE_DOT, fill: Rgba::from(ds.color()), outline: None });
            }
            series.push(RadarSeries { dataset: j, color: ds.color(), values, vertices });
        }

        let legend = (chart.datasets().len() > 1).then(|| frame::series_legend(chart));
        debug!(axes = categories.len(), series = series.len(), radius, "radar layout");
        Ok(Self { title: frame::title(chart), center, radius, categories, rings, axes, axis_labels, series, dots, legend })
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(title) = &self.title {
            title.paint(canvas);
        }
        for l in self.rings.iter().chain(&self.axes) {
            l.paint(canvas);
        }
        for t in &self.axis_labels {
            t.paint(canvas);
        }
        for s in &self.series {
            let stroke = Stroke::solid(s.color);
            let n = s.vertices.len();
            for i in 0..n {
                canvas.line(s.vertices[i], s.vertices[(i + 1) % n], &stroke);
            }
        }
        for d in &self.dots {
            d.paint(canvas);
        }
        if let Some(legend) = &self.legend {
            legend.paint(canvas);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Rim label placement for an axis at `degrees` clockwise from the top.
pub fn axis_label_side(degrees: f32) -> LabelSide {
    let d = degrees.rem_euclid(360.0).floor();
    if d >= 330.0 || d < 30.0 {
        LabelSide::Top
    } else if (150.0..210.0).contains(&d) {
        LabelSide::Bottom
    } else if d < 150.0 {
        LabelSide::Right
    } else {
        LabelSide::Left
    }
}
