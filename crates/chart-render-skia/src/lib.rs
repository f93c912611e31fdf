// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia raster backend for chart-core: CPU surface, textlayout text, `image` encoding.

pub mod canvas;
pub mod encode;
pub mod text;

use std::path::Path;
use std::sync::Arc;

use chart_core::{Backend, Color, GeometryRenderer, ImageFormat, Renderers, Result, Size, RASTER_RENDERER};
use tracing::debug;

pub use canvas::SkiaCanvas;
pub use text::{FontData, TextShaper};

pub const BACKEND_NAME: &str = "skia";

/// Raster backend. Text uses system fonts unless a font file is supplied.
#[derive(Clone, Debug, Default)]
pub struct SkiaBackend {
    font: Option<Arc<FontData>>,
}

impl SkiaBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer the font at `path`; fails with `MissingResource` when it cannot be loaded.
    pub fn with_font_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self { font: Some(Arc::new(FontData::load(path)?)) })
    }
}

impl Backend for SkiaBackend {
    type Surface = SkiaCanvas;

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn supports(&self, format: ImageFormat) -> bool {
        encode::supports(format)
    }

    fn create(&self, size: Size, background: Color) -> Result<SkiaCanvas> {
        debug!(width = size.width(), height = size.height(), "creating raster surface");
        SkiaCanvas::new(size, background, TextShaper::new(self.font.as_deref()))
    }

    fn encode(&self, mut surface: SkiaCanvas, format: ImageFormat) -> Result<Vec<u8>> {
        let size = chart_core::Canvas::size(&surface);
        let pixels = surface.read_rgba()?;
        encode::encode_rgba(size.width(), size.height(), pixels, format)
    }
}

/// The raster renderer, registered under `"raster"`.
pub fn raster_renderer(backend: SkiaBackend) -> GeometryRenderer<SkiaBackend> {
    GeometryRenderer::new(RASTER_RENDERER, backend)
}

/// Registry with both the text renderer and the raster renderer over system fonts.
pub fn renderers() -> Renderers {
    Renderers::text().with(Arc::new(raster_renderer(SkiaBackend::new())))
}
