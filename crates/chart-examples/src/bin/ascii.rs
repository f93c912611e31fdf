// File: crates/chart-examples/src/bin/ascii.rs
// Summary: Prints the character-cell rendering of each text-capable chart type.

use anyhow::Result;
use chart_core::{Chart, ChartOptions, ChartType, ImageFormat, Renderers, Size, StandardDataset};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let registry = Renderers::text();
    let options = ChartOptions::builder()
        .size(Size::new(64, 10)?)
        .image_format(ImageFormat::Txt)
        .renderer("text")
        .build();

    for chart_type in [ChartType::Bar, ChartType::HorizontalBar, ChartType::Line, ChartType::Scatter] {
        let mut chart = Chart::new(chart_type).with_options(options.clone()).with_title(chart_type.as_str());
        chart.add_standard(
            StandardDataset::from_pairs([("Lunes", 12.0), ("Martes", 30.0), ("Miercoles", 22.0), ("Jueves", 41.0)])
                .with_label("Tickets"),
        )?;
        if chart_type == ChartType::Scatter {
            chart.add_standard(
                StandardDataset::from_pairs([("Lunes", 8.0), ("Martes", 14.0), ("Miercoles", 35.0), ("Jueves", 20.0)])
                    .with_label("Cerrados"),
            )?;
        }
        let out = chart.render(&registry)?;
        println!("{}\n", out.as_text().unwrap_or_default());
    }
    Ok(())
}
