// File: crates/chart-examples/src/bin/lines.rs
// Summary: Minimal example that renders a two-series line chart to PNG.

use anyhow::{Context, Result};
use chart_core::{Chart, ChartType, StandardDataset};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let mut chart = Chart::new(ChartType::Line).with_title("Visitas por mes");
    chart.add_standard(
        StandardDataset::from_pairs([("Ene", 120.0), ("Feb", 180.0), ("Mar", 140.0), ("Abr", 220.0), ("May", 260.0)])
            .with_label("2024"),
    )?;
    chart.add_standard(
        StandardDataset::from_pairs([("Ene", 90.0), ("Feb", 130.0), ("Mar", 170.0), ("Abr", 150.0), ("May", 210.0)])
            .with_label("2023"),
    )?;

    let bytes = chart.render(&chart_render_skia::renderers())?.into_bytes();
    let out = std::path::PathBuf::from("target/out/example_lines.png");
    std::fs::create_dir_all("target/out").context("creating target/out")?;
    std::fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}
