// File: crates/chart-core/src/render.rs
// Summary: Renderer contract, registry of renderers by id, and the layout-then-paint renderer over a Backend.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::ascii::TextRenderer;
use crate::canvas::Backend;
use crate::chart::Chart;
use crate::error::{ChartError, Result};
use crate::layout::Layout;

/// What a renderer produced: encoded image bytes or character-cell text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutput {
    Bytes(Vec<u8>),
    Text(String),
}

impl RenderOutput {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RenderOutput::Bytes(b) => b,
            RenderOutput::Text(t) => t.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RenderOutput::Bytes(b) => b,
            RenderOutput::Text(t) => t.into_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderOutput::Text(t) => Some(t),
            RenderOutput::Bytes(_) => None,
        }
    }

    pub fn len(&self) -> usize { self.as_bytes().len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

pub trait Renderer: Send + Sync {
    fn id(&self) -> &str;
    fn render(&self, chart: &Chart) -> Result<RenderOutput>;
}

/// Renderers addressable by id, in registration order.
#[derive(Clone, Default)]
pub struct Renderers {
    by_id: IndexMap<String, Arc<dyn Renderer>>,
}

impl Renderers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the character-cell renderer under `"text"`.
    pub fn text() -> Self {
        Self::new().with(Arc::new(TextRenderer))
    }

    /// Register `renderer` under its id, replacing any previous one.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) -> &mut Self {
        let id = renderer.id().to_string();
        debug!(renderer = %id, "registering renderer");
        self.by_id.insert(id, renderer);
        self
    }

    pub fn with(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.register(renderer);
        self
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn Renderer>> {
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| ChartError::UnknownRenderer(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }
}

impl fmt::Debug for Renderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

/// Computes the layout, paints it on a fresh backend surface, and encodes the result.
pub struct GeometryRenderer<B: Backend> {
    id: String,
    backend: B,
}

impl<B: Backend> GeometryRenderer<B> {
    pub fn new(id: impl Into<String>, backend: B) -> Self {
        Self { id: id.into(), backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> Renderer for GeometryRenderer<B> {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, chart: &Chart) -> Result<RenderOutput> {
        chart.validate()?;
        let opts = chart.options();
        let format = opts.image_format();
        if !self.backend.supports(format) {
            return Err(ChartError::UnsupportedFormat { format, backend: self.backend.name() });
        }
        let mut surface = self.backend.create(opts.size(), opts.background_color())?;
        let layout = Layout::compute(chart, &surface)?;
        layout.paint(&mut surface);
        let bytes = self.backend.encode(surface, format)?;
        debug!(renderer = %self.id, chart_type = %chart.chart_type(), %format, bytes = bytes.len(), "rendered chart");
        Ok(RenderOutput::Bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::RecordingCanvas;
    use crate::chart::ChartType;
    use crate::color::Color;
    use crate::dataset::StandardDataset;
    use crate::options::{ChartOptions, ImageFormat};
    use crate::types::Size;

    /// Backend that "encodes" the number of recorded draw calls.
    struct CountingBackend;

    impl Backend for CountingBackend {
        type Surface = RecordingCanvas;
        fn name(&self) -> &'static str { "counting" }
        fn supports(&self, format: ImageFormat) -> bool { format == ImageFormat::Png }
        fn create(&self, size: Size, _background: Color) -> Result<RecordingCanvas> { Ok(RecordingCanvas::new(size)) }
        fn encode(&self, surface: RecordingCanvas, _format: ImageFormat) -> Result<Vec<u8>> {
            Ok(surface.into_ops().len().to_string().into_bytes())
        }
    }

    fn chart() -> Chart {
        let mut c = Chart::new(ChartType::Line);
        c.add_dataset(StandardDataset::from_pairs([("a", 1.0), ("b", 3.0)])).unwrap();
        c
    }

    #[test]
    fn default_renderer_comes_from_registry() {
        let registry = Renderers::text().with(Arc::new(GeometryRenderer::new("raster", CountingBackend)));
        let out = chart().render(&registry).unwrap();
        assert!(matches!(out, RenderOutput::Bytes(ref b) if !b.is_empty()));
    }

    #[test]
    fn missing_default_renderer_is_reported() {
        assert!(matches!(chart().render(&Renderers::new()), Err(ChartError::UnknownRenderer(id)) if id == "raster"));
    }

    #[test]
    fn instance_override_bypasses_registry() {
        let mut c = chart();
        let r: Arc<dyn Renderer> = Arc::new(GeometryRenderer::new("mine", CountingBackend));
        c.set_renderer(r);
        assert!(c.render(&Renderers::new()).is_ok());
    }

    #[test]
    fn unsupported_format_fails_before_drawing() {
        let c = chart().with_options(ChartOptions::builder().image_format(ImageFormat::Svg).build());
        let r = GeometryRenderer::new("raster", CountingBackend);
        assert!(matches!(
            r.render(&c),
            Err(ChartError::UnsupportedFormat { format: ImageFormat::Svg, backend: "counting" })
        ));
    }

    #[test]
    fn registry_lists_ids_in_order() {
        let registry = Renderers::text().with(Arc::new(GeometryRenderer::new("raster", CountingBackend)));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["text", "raster"]);
        assert!(registry.contains("raster"));
    }
}
