// File: crates/chart-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic untitled single-dataset stacked bar chart to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chart_core::{Chart, ChartOptions, ChartType, Size, StandardDataset};
use chart_render_skia::renderers;

fn render_bytes() -> Vec<u8> {
    // No title, value labels or legend. Tick and category text is drawn at size 1
    // so glyph rasterization differences across platforms stay near invisible.
    let opts = ChartOptions::builder()
        .size(Size::new(200, 120).unwrap())
        .show_labels_on_grid(false)
        .title_font_size(1)
        .label_font_size(1)
        .build();
    let mut chart = Chart::new(ChartType::StackedBar).with_options(opts);
    chart.add_standard(StandardDataset::from_pairs([("a", 3.0), ("b", 5.0), ("c", 2.0)])).unwrap();
    chart.render(&renderers()).expect("render").into_bytes()
}

#[test]
fn golden_stacked_bar() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("stacked_bar.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
