// File: crates/demo/src/main.rs
// Summary: Demo loads a `category,value[,size]` CSV and renders one chart type to PNG (and TXT where supported).
// Usage: chart-demo [CSV] [TYPE] [TITLE]    (RUST_LOG=debug for layout/render tracing)

use anyhow::{Context, Result};
use chart_core::{
    BubbleDataset, Chart, ChartOptions, ChartType, DatasetKind, ImageFormat, Renderers, Size, StandardDataset,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Chart types the text renderer can draw.
const TEXT_TYPES: [ChartType; 4] = [ChartType::Bar, ChartType::HorizontalBar, ChartType::Line, ChartType::Scatter];

struct Row {
    category: String,
    value: f64,
    size: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sales.csv"));
    let chart_type = args.next().map_or(ChartType::Bar, |t| ChartType::parse_or_default(&t));
    let title = args.next().unwrap_or_else(|| chart_type.as_str().replace('_', " "));

    info!(input = %path.display(), %chart_type, "loading data");
    let rows = load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if rows.is_empty() {
        anyhow::bail!("no rows loaded; expected `category,value[,size]` records");
    }
    info!(rows = rows.len(), "loaded rows");

    let registry = chart_render_skia::renderers();

    let png = build_chart(chart_type, &title, &rows, ChartOptions::default())?;
    let out_png = out_name_with(&path, chart_type, "png")?;
    write_render(&png, &registry, &out_png)?;

    if TEXT_TYPES.contains(&chart_type) {
        let opts = ChartOptions::builder()
            .size(Size::new(72, 12)?)
            .image_format(ImageFormat::Txt)
            .renderer("text")
            .build();
        let txt = build_chart(chart_type, &title, &rows, opts)?;
        let out_txt = out_png.with_extension("txt");
        write_render(&txt, &registry, &out_txt)?;
        println!("{}", std::fs::read_to_string(&out_txt)?);
    } else {
        warn!(%chart_type, "no text rendering for this chart type");
    }
    Ok(())
}

fn build_chart(chart_type: ChartType, title: &str, rows: &[Row], options: ChartOptions) -> Result<Chart> {
    let mut chart = Chart::new(chart_type).with_options(options).with_title(title);
    match chart_type.dataset_kind() {
        DatasetKind::Standard => {
            let ds = StandardDataset::from_pairs(rows.iter().map(|r| (r.category.as_str(), r.value)));
            chart.add_standard(ds.with_label("value"))?;
        }
        DatasetKind::Bubble => {
            let mut ds = BubbleDataset::new().with_label("value");
            for r in rows {
                ds.add_point(r.category.as_str(), r.value, r.size.unwrap_or(r.value), None);
            }
            chart.add_bubble(ds)?;
        }
    }
    Ok(chart)
}

fn write_render(chart: &Chart, registry: &Renderers, out: &Path) -> Result<()> {
    let output = chart
        .render(registry)
        .with_context(|| format!("rendering {} chart", chart.chart_type()))?;
    std::fs::write(out, output.as_bytes()).with_context(|| format!("writing {}", out.display()))?;
    info!(output = %out.display(), bytes = output.len(), "wrote chart");
    Ok(())
}

/// Output file name like target/out/chart_<stem>_<type>.<ext>
fn out_name_with(input: &Path, chart_type: ChartType, ext: &str) -> Result<PathBuf> {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    out.push(format!("chart_{}_{}.{}", stem, chart_type.as_str(), ext));
    Ok(out)
}

/// Load `category,value[,size]` rows. Header names are matched case-insensitively.
fn load_csv(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_category = idx(&["category", "label", "name"]).unwrap_or(0);
    let i_value = idx(&["value", "amount", "y"]).unwrap_or(1);
    let i_size = idx(&["size", "radius", "weight"]);

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(value) = rec.get(i_value).and_then(|s| s.parse::<f64>().ok()) else {
            warn!(line = line + 2, "skipping row without a numeric value");
            continue;
        };
        out.push(Row {
            category: rec.get(i_category).unwrap_or_default().to_string(),
            value,
            size: i_size.and_then(|i| rec.get(i)).and_then(|s| s.parse().ok()),
        });
    }
    Ok(out)
}
