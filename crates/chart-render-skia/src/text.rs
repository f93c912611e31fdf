// File: crates/chart-render-skia/src/text.rs
// Summary: Text shaping and measurement through Skia textlayout, with an optional bundled font.

use std::path::Path;

use chart_core::{ChartError, Result};
use skia::textlayout::{
    FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle, TypefaceFontProvider,
};
use skia_safe as skia;
use tracing::debug;

const SANS_FAMILIES: [&str; 6] = ["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

/// Font bytes loaded from disk, checked to hold a usable typeface.
#[derive(Clone, Debug)]
pub struct FontData {
    bytes: Vec<u8>,
}

impl FontData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ChartError::MissingResource(format!("font {}: {e}", path.display())))?;
        if skia::FontMgr::new().new_from_data(&bytes, None).is_none() {
            return Err(ChartError::MissingResource(format!("font {}: not a typeface", path.display())));
        }
        Ok(Self { bytes })
    }
}

pub struct TextShaper {
    fonts: FontCollection,
    families: Vec<String>,
}

impl TextShaper {
    /// Shaper over the system fonts, with `font` preferred when given.
    pub fn new(font: Option<&FontData>) -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        let mut families: Vec<String> = SANS_FAMILIES.iter().map(|f| f.to_string()).collect();

        if let Some(typeface) = font.and_then(|f| skia::FontMgr::new().new_from_data(&f.bytes, None)) {
            let family = typeface.family_name();
            let mut provider = TypefaceFontProvider::new();
            provider.register_typeface(typeface, Some(family.as_str()));
            let assets: skia::FontMgr = provider.into();
            fc.set_asset_font_manager(Some(assets));
            debug!(%family, "using bundled font");
            families.insert(0, family);
        }
        Self { fonts: fc, families }
    }

    fn make_style(&self, size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&self.families);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&self.make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, bold).max_intrinsic_width()
    }
}
