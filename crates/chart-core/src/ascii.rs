// File: crates/chart-core/src/ascii.rs
// Summary: Character-cell renderer for bar, horizontal bar, line and scatter charts.
// Notes:
// - `Size` is read as character columns (width) and rows (height).
// - Each category takes a 4-column slot; labels are cut to 3 characters.

use tracing::debug;

use crate::chart::{Chart, ChartType, TEXT_RENDERER};
use crate::dataset::AnyDataset;
use crate::error::{ChartError, Result};
use crate::format;
use crate::options::ImageFormat;
use crate::render::{RenderOutput, Renderer};

const AXIS_VERTICAL: char = '│';
const AXIS_HORIZONTAL: char = '─';
const AXIS_CORNER: char = '└';
const BLOCK: char = '█';
const LINE_UP: char = '╭';
const LINE_DOWN: char = '╰';
/// Point markers, one per dataset, cycling.
pub const POINT_SYMBOLS: [char; 8] = ['●', '○', '■', '□', '◆', '◇', '▲', '△'];

const LABEL_LEN: usize = 3;
const SLOT: usize = LABEL_LEN + 1;
const HBAR_VALUE_PADDING: usize = 2;
const HBAR_MAX_VALUE_LEN: usize = 15;
const HBAR_MAX_LABEL_LEN: usize = 15;
const HBAR_SCALE_POINTS: usize = 5;

/// Renders supported chart types as box-drawing text. Requires `ImageFormat::Txt`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn id(&self) -> &str {
        TEXT_RENDERER
    }

    fn render(&self, chart: &Chart) -> Result<RenderOutput> {
        chart.validate()?;
        let format = chart.options().image_format();
        if format != ImageFormat::Txt {
            return Err(ChartError::UnsupportedFormat { format, backend: TEXT_RENDERER });
        }
        let body = match chart.chart_type() {
            ChartType::Bar => bar(chart)?,
            ChartType::HorizontalBar => horizontal_bar(chart)?,
            ChartType::Line => line(chart)?,
            ChartType::Scatter => scatter(chart)?,
            chart_type => {
                return Err(ChartError::UnsupportedChart { renderer: TEXT_RENDERER.to_string(), chart_type })
            }
        };
        let mut out = title(chart);
        out.push_str(&body);
        debug!(chart_type = %chart.chart_type(), lines = out.lines().count(), "rendered text chart");
        Ok(RenderOutput::Text(out))
    }
}

fn title(chart: &Chart) -> String {
    match chart.title().filter(|t| !t.is_empty()) {
        Some(t) => format!("{}\n\n", center(t, chart.options().size().width() as usize)),
        None => String::new(),
    }
}

/// Center `text` in `width` columns, cutting it when it does not fit.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

fn cut(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

fn pad_left(text: &str, width: usize) -> String {
    format!("{text:>width$}")
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Padded upper bound of the scale; text charts measure everything against it.
fn positive_max(chart: &Chart) -> Result<f64> {
    let scale = chart.scale()?;
    let max = scale.max();
    if max <= 0.0 {
        return Err(ChartError::InvalidScale { min: scale.min(), max });
    }
    Ok(max)
}

fn category_axis(label_len: usize, slots: usize, extra: usize) -> String {
    let mut row = pad_left("0", label_len);
    row.push(' ');
    row.push(AXIS_CORNER);
    row.extend(std::iter::repeat(AXIS_HORIZONTAL).take(slots * SLOT + extra));
    row
}

fn category_labels(label_len: usize, ds: &AnyDataset) -> String {
    let mut row = " ".repeat(label_len + 3);
    for p in ds.points() {
        row.push_str(&pad_right(&cut(p.label(), LABEL_LEN), SLOT));
    }
    row
}

/// Row of `slots` blank cells.
fn blank_cells(slots: usize) -> Vec<char> {
    vec![' '; slots * SLOT]
}

/// Row index of `value` among `rows` rows, 0 at the top.
fn row_of(value: f64, max: f64, rows: usize) -> usize {
    let r = (rows as f64 * (1.0 - value / max)).round();
    r.clamp(0.0, rows.saturating_sub(1) as f64) as usize
}

fn bar(chart: &Chart) -> Result<String> {
    let ds = &chart.datasets()[0];
    let max = positive_max(chart)?;
    let rows = chart.options().size().height() as usize;
    let step = max / rows as f64;
    let label_len = format::thousands(max, 0).chars().count();

    let mut lines = Vec::with_capacity(rows + 2);
    for i in (1..=rows).rev() {
        let current = i as f64 * step;
        let mut row = format!("{} {} ", pad_left(&format::thousands(current, 0), label_len), AXIS_VERTICAL);
        for p in ds.points() {
            if p.value() >= current - step * 1e-9 {
                row.extend(std::iter::repeat(BLOCK).take(LABEL_LEN));
                row.push(' ');
            } else {
                row.push_str(&" ".repeat(SLOT));
            }
        }
        lines.push(row);
    }
    lines.push(category_axis(label_len, ds.len(), 1));
    lines.push(category_labels(label_len, ds));
    Ok(lines.join("\n"))
}

fn horizontal_bar(chart: &Chart) -> Result<String> {
    let ds = &chart.datasets()[0];
    let max = chart.scale()?.max();
    let width = chart.options().size().width() as usize;
    let label_len = ds.points().map(|p| p.label().chars().count()).max().unwrap_or(0).min(HBAR_MAX_LABEL_LEN);
    let value_space = HBAR_MAX_VALUE_LEN + HBAR_VALUE_PADDING * 2;
    let available = width.saturating_sub(label_len + value_space);

    let mut out = String::new();
    for p in ds.points() {
        let len = ((p.value() / max) * available as f64).round().max(0.0) as usize;
        out.push_str(&pad_right(&cut(p.label(), label_len), label_len));
        out.push(' ');
        out.push(AXIS_VERTICAL);
        out.push(' ');
        out.extend(std::iter::repeat(BLOCK).take(len));
        out.push(' ');
        out.push_str(&format::thousands(p.value(), 0));
        out.push('\n');
    }

    out.push_str(&" ".repeat(label_len + 1));
    out.push(AXIS_CORNER);
    out.extend(std::iter::repeat(AXIS_HORIZONTAL).take(available + 1));
    out.push('\n');

    out.push_str(&" ".repeat(label_len + 1));
    let step = max / HBAR_SCALE_POINTS as f64;
    let cell = (available as f64 / HBAR_SCALE_POINTS as f64).round() as usize;
    for i in 0..=HBAR_SCALE_POINTS {
        out.push_str(&pad_right(&format::short(i as f64 * step, 0), cell));
    }
    Ok(out)
}

fn line(chart: &Chart) -> Result<String> {
    let ds = &chart.datasets()[0];
    let max = positive_max(chart)?;
    let rows = chart.options().size().height() as usize;
    let step = max / rows as f64;
    let label_len = format::thousands(max, 0).chars().count();
    let values: Vec<f64> = ds.values().collect();
    let pos: Vec<usize> = values.iter().map(|&v| row_of(v, max, rows)).collect();

    let mut lines = Vec::with_capacity(rows + 2);
    for i in 0..rows {
        let current = max - i as f64 * step;
        let mut cells = blank_cells(values.len());
        for (idx, &v) in values.iter().enumerate() {
            let x = idx * SLOT;
            if pos[idx] == i {
                cells[x] = if v >= current { POINT_SYMBOLS[0] } else { POINT_SYMBOLS[1] };
                if idx > 0 {
                    let prev_x = x - SLOT;
                    for c in &mut cells[prev_x + 1..x] {
                        *c = AXIS_HORIZONTAL;
                    }
                    let prev_y = pos[idx - 1];
                    if prev_y > i {
                        cells[prev_x] = LINE_UP;
                    } else if prev_y < i {
                        cells[prev_x] = LINE_DOWN;
                    }
                }
            }
            if idx > 0 {
                let (a, b) = (pos[idx - 1].min(pos[idx]), pos[idx - 1].max(pos[idx]));
                if i > a && i < b {
                    cells[x - SLOT] = AXIS_VERTICAL;
                }
            }
        }
        let mut row = format!("{} {} ", pad_left(&format::thousands(current, 0), label_len), AXIS_VERTICAL);
        row.extend(cells);
        lines.push(row);
    }
    lines.push(category_axis(label_len, values.len(), 0));
    lines.push(category_labels(label_len, ds));
    Ok(lines.join("\n"))
}

fn scatter(chart: &Chart) -> Result<String> {
    let datasets = chart.datasets();
    let max = positive_max(chart)?;
    let rows = chart.options().size().height() as usize;
    let step = max / rows as f64;
    let label_len = format::thousands(max, 0).chars().count();
    let slots = datasets.iter().map(AnyDataset::len).max().unwrap_or(0);
    let positions: Vec<Vec<usize>> = datasets
        .iter()
        .map(|ds| ds.values().map(|v| row_of(v, max, rows)).collect())
        .collect();

    let mut lines = Vec::with_capacity(rows + 4 + datasets.len());
    for i in 0..rows {
        let current = max - i as f64 * step;
        let mut cells = blank_cells(slots);
        for (j, pos) in positions.iter().enumerate() {
            let symbol = POINT_SYMBOLS[j % POINT_SYMBOLS.len()];
            for (idx, &y) in pos.iter().enumerate() {
                if y == i {
                    cells[idx * SLOT] = symbol;
                }
            }
        }
        let mut row = format!("{} {} ", pad_left(&format::thousands(current, 0), label_len), AXIS_VERTICAL);
        row.extend(cells);
        lines.push(row);
    }
    lines.push(category_axis(label_len, slots, 0));
    lines.push(category_labels(label_len, &datasets[0]));

    lines.push(String::new());
    for (j, ds) in datasets.iter().enumerate() {
        let symbol = POINT_SYMBOLS[j % POINT_SYMBOLS.len()];
        lines.push(format!("{}{} {}", " ".repeat(label_len + 3), symbol, ds.label().unwrap_or_default()));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StandardDataset;
    use crate::options::ChartOptions;
    use crate::types::Size;

    fn text_chart(t: ChartType, width: i64, height: i64, sets: &[&[(&str, f64)]]) -> Chart {
        let opts = ChartOptions::builder()
            .size(Size::new(width, height).unwrap())
            .image_format(ImageFormat::Txt)
            .build();
        let mut c = Chart::new(t).with_options(opts);
        for (k, pairs) in sets.iter().enumerate() {
            let ds = StandardDataset::from_pairs(pairs.iter().map(|(l, v)| (*l, *v))).with_label(format!("S{k}"));
            c.add_dataset(ds).unwrap();
        }
        c
    }

    fn render(c: &Chart) -> String {
        TextRenderer.render(c).unwrap().as_text().unwrap().to_string()
    }

    #[test]
    fn bar_rows_fill_from_value() {
        // scale max 45, so rows sit at 45, 33.75, 22.5 and 11.25
        let c = text_chart(ChartType::Bar, 40, 4, &[&[("Enero", 40.0), ("Febrero", 20.0)]]);
        let out = render(&c);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "45 │         ");
        assert_eq!(lines[1], "34 │ ███     ");
        assert!(lines[2].ends_with(" │ ███     "));
        assert_eq!(lines[3], "11 │ ███ ███ ");
        assert_eq!(lines[4], " 0 └─────────");
        assert_eq!(lines[5], "     Ene Feb ");
    }

    #[test]
    fn title_is_centered_over_width() {
        let mut c = text_chart(ChartType::Bar, 10, 2, &[&[("a", 1.0), ("b", 2.0)]]);
        c.set_title("Sales");
        let out = render(&c);
        assert!(out.starts_with("  Sales   \n\n"));
        assert_eq!(center("much too long", 4), "much");
    }

    #[test]
    fn horizontal_bar_scales_to_available_width() {
        let c = text_chart(ChartType::HorizontalBar, 40, 10, &[&[("Jan", 10.0), ("Feb", 20.0)]]);
        let out = render(&c);
        let lines: Vec<&str> = out.lines().collect();
        // scale max 25, available 40 - 3 - 19 = 18
        assert!(lines[0].starts_with("Jan │ "));
        assert_eq!(lines[0].chars().filter(|&c| c == BLOCK).count(), 7);
        assert_eq!(lines[1].chars().filter(|&c| c == BLOCK).count(), 14);
        assert!(lines[1].ends_with(" 20"));
        assert!(lines[3].trim_start().starts_with('0'));
        assert!(lines[3].contains("25"));
    }

    #[test]
    fn line_connects_points() {
        let c = text_chart(ChartType::Line, 40, 4, &[&[("a", 10.0), ("b", 40.0)]]);
        let out = render(&c);
        assert!(out.contains('●'));
        assert!(out.contains(LINE_UP) || out.contains(AXIS_VERTICAL));
        assert!(out.lines().any(|l| l.contains("●───")  || l.contains("───●")));
    }

    #[test]
    fn scatter_uses_one_symbol_per_dataset_and_lists_legend() {
        let c = text_chart(ChartType::Scatter, 40, 5, &[&[("a", 10.0), ("b", 50.0)], &[("a", 30.0), ("b", 20.0)]]);
        let out = render(&c);
        assert!(out.contains('●') && out.contains('○'));
        assert!(out.lines().any(|l| l.trim() == "● S0"));
        assert!(out.lines().any(|l| l.trim() == "○ S1"));
    }

    #[test]
    fn polar_charts_are_not_supported() {
        let c = text_chart(ChartType::Pie, 40, 5, &[&[("a", 1.0)]]);
        assert!(matches!(TextRenderer.render(&c), Err(ChartError::UnsupportedChart { .. })));
    }

    #[test]
    fn raster_formats_are_rejected() {
        let mut c = text_chart(ChartType::Bar, 40, 5, &[&[("a", 1.0)]]);
        c.set_options(ChartOptions::default());
        assert!(matches!(
            TextRenderer.render(&c),
            Err(ChartError::UnsupportedFormat { format: ImageFormat::Png, .. })
        ));
    }
}
