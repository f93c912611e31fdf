// File: crates/chart-render-skia/src/encode.rs
// Summary: RGBA pixel buffer to PNG / JPEG / WEBP / GIF bytes via the `image` crate.

use std::io::Cursor;

use chart_core::{ChartError, ImageFormat, Result};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::BACKEND_NAME;

/// Formats this backend can encode.
pub fn supports(format: ImageFormat) -> bool {
    format.is_raster()
}

pub fn encode_rgba(width: u32, height: u32, pixels: Vec<u8>, format: ImageFormat) -> Result<Vec<u8>> {
    let target = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Webp => image::ImageFormat::WebP,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::Svg | ImageFormat::Txt => {
            return Err(ChartError::UnsupportedFormat { format, backend: BACKEND_NAME })
        }
    };
    let rgba = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| ChartError::Backend(format!("pixel buffer does not fill {width}x{height}")))?;
    let img = match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        _ => DynamicImage::ImageRgba8(rgba),
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, target)
        .map_err(|e| ChartError::Backend(format!("{format} encoding failed: {e}")))?;
    let bytes = out.into_inner();
    debug!(%format, width, height, bytes = bytes.len(), "encoded raster image");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(w: u32, h: u32) -> Vec<u8> {
        [255u8, 0, 0, 255].repeat((w * h) as usize)
    }

    #[test]
    fn every_raster_format_decodes_back() {
        for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp, ImageFormat::Gif] {
            let bytes = encode_rgba(4, 3, red(4, 3), format).unwrap();
            let img = image::load_from_memory(&bytes).unwrap();
            assert_eq!((img.width(), img.height()), (4, 3), "{format}");
        }
    }

    #[test]
    fn vector_and_text_formats_are_rejected() {
        for format in [ImageFormat::Svg, ImageFormat::Txt] {
            assert!(!supports(format));
            assert!(matches!(encode_rgba(1, 1, red(1, 1), format), Err(ChartError::UnsupportedFormat { .. })));
        }
    }

    #[test]
    fn short_buffer_is_a_backend_error() {
        assert!(matches!(encode_rgba(2, 2, vec![0; 4], ImageFormat::Png), Err(ChartError::Backend(_))));
    }
}
