// File: crates/chart-examples/src/bin/gallery.rs
// Summary: Renders every chart type from a JSON configuration to target/out/gallery_<type>.png.

use anyhow::{Context, Result};
use chart_core::{Chart, ChartConfig, ChartOptions, ChartType, ColorGroup, Palette, Size};

const STANDARD: &str = r#"{
    "title": "Ventas trimestrales",
    "label_x": "Trimestre",
    "label_y": "Monto",
    "datasets": [
        {"label": "Norte", "color": "rich_blue", "points": {"Q1": 1200, "Q2": 1850, "Q3": 960, "Q4": 2400}},
        {"label": "Sur", "color": "golden_orange", "points": {"Q1": 800, "Q2": 1100, "Q3": 1500, "Q4": 1300}}
    ]
}"#;

const BUBBLE: &str = r#"{
    "title": "Clientes por segmento",
    "datasets": [
        {"label": "2024", "points": {"Pyme": [40, 25], "Retail": [65, 70], "Gobierno": {"value": 30, "size": 45}}}
    ]
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let registry = chart_render_skia::renderers();
    std::fs::create_dir_all("target/out").context("creating target/out")?;

    for (i, chart_type) in ChartType::ALL.into_iter().enumerate() {
        let json = if chart_type == ChartType::Bubble { BUBBLE } else { STANDARD };
        let mut config = ChartConfig::from_json(json)?;
        config.chart_type = Some(chart_type.as_str().to_string());
        let options = ChartOptions::builder()
            .size(Size::new(800, 400)?)
            .labels_on_grid_color(Palette::by_index(i, ColorGroup::Professional))
            .build();
        let chart = Chart::from_config(&config.with_options(options))?;

        let out = format!("target/out/gallery_{}.png", chart_type.as_str());
        let bytes = chart.render(&registry).with_context(|| format!("rendering {chart_type}"))?.into_bytes();
        std::fs::write(&out, bytes).with_context(|| format!("writing {out}"))?;
        println!("Wrote {out}");
    }
    Ok(())
}
