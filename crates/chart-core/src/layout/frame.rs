// File: crates/chart-core/src/layout/frame.rs
// Summary: Plot frame shared by the grid charts: title band, plot rectangle, grid, axes, category labels, legend.

use crate::canvas::{Canvas, Stroke, TextAlign, TextStyle};
use crate::chart::Chart;
use crate::color::{Color, Rgba};
use crate::format;
use crate::geometry::{PointF, Rect};
use crate::scale::{BandScale, Scale, ValueScale, Y_STEPS};

/// Tick mark length on both axes.
pub const TICK_LEN: f32 = 5.0;
/// Dash on/off length of grid lines.
pub const GRID_DASH: f32 = 5.0;
/// Gap between the category axis and its labels.
pub const CATEGORY_LABEL_GAP: f32 = 10.0;
/// Legend sample line length.
pub const LEGEND_SAMPLE: f32 = 20.0;
/// Legend sample dot diameter.
pub const LEGEND_DOT: f32 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub anchor: PointF,
    pub style: TextStyle,
}

impl TextItem {
    pub fn new(text: impl Into<String>, anchor: PointF, style: TextStyle) -> Self {
        Self { text: text.into(), anchor, style }
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.text(&self.text, self.anchor, &self.style);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineItem {
    pub from: PointF,
    pub to: PointF,
    pub stroke: Stroke,
}

impl LineItem {
    pub fn new(from: PointF, to: PointF, stroke: Stroke) -> Self {
        Self { from, to, stroke }
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.line(self.from, self.to, &self.stroke);
    }
}

/// Which axis carries values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along X, values along Y.
    Vertical,
    /// Categories along Y, values along X.
    Horizontal,
}

/// Surface and plot-area geometry for one chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    pub width: f32,
    pub height: f32,
    /// Title font size when a title is present, else 0.
    pub title_height: f32,
    pub plot: Rect,
    pub orientation: Orientation,
}

impl PlotFrame {
    pub fn title_height(chart: &Chart) -> f32 {
        if chart.title().is_some_and(|t| !t.is_empty()) {
            chart.options().title_font_size() as f32
        } else {
            0.0
        }
    }

    pub fn new(chart: &Chart, orientation: Orientation) -> Self {
        let opts = chart.options();
        let (size, m) = (opts.size(), opts.margin());
        let width = size.width() as f32;
        let height = size.height() as f32;
        let title_height = Self::title_height(chart);
        // horizontal bars keep room right of the plot for value labels
        let right_inset = match orientation {
            Orientation::Vertical => m.right as f32,
            Orientation::Horizontal => m.right as f32 * 5.0,
        };
        let plot = Rect::from_ltrb(
            m.left as f32,
            (m.top as f32 + title_height * 3.0).round(),
            width - right_inset,
            height - m.bottom as f32,
        );
        Self { width, height, title_height, plot, orientation }
    }

    /// Value transform along the value axis.
    pub fn value_scale(&self, scale: &Scale) -> ValueScale {
        match self.orientation {
            Orientation::Vertical => ValueScale::from_scale(scale, self.plot.bottom, self.plot.top),
            Orientation::Horizontal => ValueScale::from_scale(scale, self.plot.left, self.plot.right),
        }
    }

    /// Category slots along the category axis.
    pub fn bands(&self, count: usize) -> BandScale {
        match self.orientation {
            Orientation::Vertical => BandScale::new(self.plot.left, self.plot.right, count),
            Orientation::Horizontal => BandScale::new(self.plot.top, self.plot.bottom, count),
        }
    }
}

/// Title, grid, axes, ticks and labels around the plot area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decorations {
    pub title: Option<TextItem>,
    pub grid: Vec<LineItem>,
    pub axes: Vec<LineItem>,
    pub ticks: Vec<LineItem>,
    pub tick_labels: Vec<TextItem>,
    pub category_labels: Vec<TextItem>,
}

impl Decorations {
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(title) = &self.title {
            title.paint(canvas);
        }
        for l in self.grid.iter().chain(&self.axes).chain(&self.ticks) {
            l.paint(canvas);
        }
        for t in self.tick_labels.iter().chain(&self.category_labels) {
            t.paint(canvas);
        }
    }
}

/// Title centered at the top margin, bold.
pub fn title(chart: &Chart) -> Option<TextItem> {
    let text = chart.title().filter(|t| !t.is_empty())?;
    let opts = chart.options();
    let style = TextStyle::new(opts.title_font_size() as f32, opts.text_color())
        .align(TextAlign::Center)
        .bold();
    let anchor = PointF::new(opts.size().width() as f32 / 2.0, opts.margin().top as f32);
    Some(TextItem::new(text, anchor, style))
}

/// Grid, axes and labels for a grid chart with `categories` slots.
pub fn decorations(chart: &Chart, frame: &PlotFrame, scale: &Scale, categories: &[&str]) -> Decorations {
    let opts = chart.options();
    let font = opts.label_font_size() as f32;
    let label_style = TextStyle::new(font, opts.text_color());
    let grid_stroke = Stroke::dashed(opts.grid_color(), GRID_DASH, GRID_DASH);
    let axis_stroke = Stroke::solid(opts.axes_color());
    let p = frame.plot;
    let step_value = scale.span() / Y_STEPS as f64;
    let bands = frame.bands(categories.len());

    let mut d = Decorations { title: title(chart), ..Decorations::default() };
    d.axes.push(LineItem::new(PointF::new(p.left, p.top), PointF::new(p.left, p.bottom), axis_stroke));
    d.axes.push(LineItem::new(PointF::new(p.left, p.bottom), PointF::new(p.right, p.bottom), axis_stroke));

    match frame.orientation {
        Orientation::Vertical => {
            let step_px = p.height() / Y_STEPS as f32;
            for i in 0..=Y_STEPS {
                let y = (p.top + step_px * i as f32).round();
                let value = scale.max() - step_value * i as f64;
                d.grid.push(LineItem::new(PointF::new(p.left, y), PointF::new(p.right, y), grid_stroke));
                d.ticks.push(LineItem::new(PointF::new(p.left - TICK_LEN, y), PointF::new(p.left, y), axis_stroke));
                d.tick_labels.push(TextItem::new(
                    format::integer(value),
                    PointF::new(p.left - TICK_LEN, (y - font / 2.0).round()),
                    label_style.align(TextAlign::Right),
                ));
            }
            let category_style = label_style.align(TextAlign::Center).angle(opts.label_x_angle());
            for (i, label) in categories.iter().enumerate() {
                let x = bands.center(i).round();
                d.ticks.push(LineItem::new(PointF::new(x, p.bottom), PointF::new(x, p.bottom + TICK_LEN), axis_stroke));
                d.category_labels.push(TextItem::new(
                    *label,
                    PointF::new(x, p.bottom + CATEGORY_LABEL_GAP),
                    category_style,
                ));
            }
        }
        Orientation::Horizontal => {
            let step_px = p.width() / Y_STEPS as f32;
            for i in 0..=Y_STEPS {
                let x = (p.left + step_px * i as f32).round();
                let value = scale.min() + step_value * i as f64;
                d.grid.push(LineItem::new(PointF::new(x, p.top), PointF::new(x, p.bottom), grid_stroke));
                d.ticks.push(LineItem::new(PointF::new(x, p.bottom), PointF::new(x, p.bottom + TICK_LEN), axis_stroke));
                d.tick_labels.push(TextItem::new(
                    format::integer(value),
                    PointF::new(x, p.bottom + TICK_LEN),
                    label_style.align(TextAlign::Center),
                ));
            }
            for (i, label) in categories.iter().enumerate() {
                let y = bands.center(i);
                d.category_labels.push(TextItem::new(
                    *label,
                    PointF::new(p.left - TICK_LEN, (y - font / 2.0).round()),
                    label_style.align(TextAlign::Right),
                ));
            }
        }
    }
    d
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendMark {
    /// Sample line with a dot at its middle.
    Line { from: PointF, to: PointF, dot: PointF, color: Color },
    Swatch { rect: Rect, color: Color },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub mark: LegendMark,
    pub text: TextItem,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        for entry in &self.entries {
            match entry.mark {
                LegendMark::Line { from, to, dot, color } => {
                    canvas.line(from, to, &Stroke::solid(color));
                    canvas.fill_ellipse(dot, LEGEND_DOT, LEGEND_DOT, Rgba::from(color));
                }
                LegendMark::Swatch { rect, color } => canvas.fill_rect(rect, Rgba::from(color)),
            }
            entry.text.paint(canvas);
        }
    }
}

/// Row of equal-width cells under the title, one per dataset.
/// Datasets without a label keep their cell but emit nothing.
pub fn series_legend(chart: &Chart) -> Legend {
    let opts = chart.options();
    let (size, m) = (opts.size(), opts.margin());
    let font = opts.label_font_size() as f32;
    let datasets = chart.datasets();
    if datasets.is_empty() {
        return Legend::default();
    }
    let cell = ((size.width() as f32 - m.hsum() as f32) / datasets.len() as f32).round();
    let top = m.top as f32 + PlotFrame::title_height(chart) + 10.0;
    let sample_y = top + (font / 2.0).round();
    let style = TextStyle::new(font, opts.text_color());

    let entries = datasets
        .iter()
        .enumerate()
        .filter_map(|(i, ds)| {
            let label = ds.label()?;
            let x = m.left as f32 + cell * i as f32;
            let end = x + LEGEND_SAMPLE;
            Some(LegendEntry {
                mark: LegendMark::Line {
                    from: PointF::new(x, sample_y),
                    to: PointF::new(end, sample_y),
                    dot: PointF::new(x + LEGEND_SAMPLE / 2.0, sample_y),
                    color: ds.color(),
                },
                text: TextItem::new(label, PointF::new(end + 5.0, top), style),
            })
        })
        .collect();
    Legend { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartType;
    use crate::dataset::StandardDataset;

    fn chart(title: Option<&str>) -> Chart {
        let mut c = Chart::new(ChartType::Bar);
        if let Some(t) = title {
            c.set_title(t);
        }
        c.add_dataset(StandardDataset::from_pairs([("Jan", 10.0), ("Feb", 20.0), ("Mar", 5.0)]).with_label("Sales"))
            .unwrap();
        c
    }

    #[test]
    fn title_reserves_three_font_sizes() {
        let plain = PlotFrame::new(&chart(None), Orientation::Vertical);
        assert_eq!(plain.plot, Rect::from_ltrb(70.0, 10.0, 740.0, 250.0));
        let titled = PlotFrame::new(&chart(Some("Sales")), Orientation::Vertical);
        assert_eq!(titled.title_height, 12.0);
        assert_eq!(titled.plot.top, 46.0);
    }

    #[test]
    fn horizontal_frame_widens_right_inset() {
        let f = PlotFrame::new(&chart(None), Orientation::Horizontal);
        assert_eq!(f.plot.right, 750.0 - 50.0);
    }

    #[test]
    fn vertical_grid_labels_run_max_to_min() {
        let c = chart(Some("Sales"));
        let frame = PlotFrame::new(&c, Orientation::Vertical);
        let scale = c.scale().unwrap();
        let d = decorations(&c, &frame, &scale, &c.categories());
        assert_eq!(d.grid.len(), Y_STEPS + 1);
        let labels: Vec<_> = d.tick_labels.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, vec!["25", "20", "15", "10", "5", "0"]);
        assert_eq!(d.category_labels.len(), 3);
        assert!(d.title.is_some());
        // 6 value ticks + one per category
        assert_eq!(d.ticks.len(), 9);
    }

    #[test]
    fn legend_skips_unlabeled_datasets() {
        let mut c = chart(None);
        c.add_dataset(StandardDataset::from_pairs([("Jan", 1.0)])).unwrap();
        let legend = series_legend(&c);
        assert_eq!(legend.len(), 1);
        match legend.entries[0].mark {
            LegendMark::Line { from, to, .. } => assert_eq!(to.x - from.x, LEGEND_SAMPLE),
            LegendMark::Swatch { .. } => panic!("expected a line sample"),
        }
    }
}
