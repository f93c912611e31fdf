// File: crates/chart-core/src/types.rs
// Summary: Shared value types and constants (surface size, margins).

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Default surface width in pixels.
pub const WIDTH: u32 = 750;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 300;

/// Surface size. Pixels for raster backends, character cells for the text backend.
/// Contract: both dimensions are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSize")]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Create a size, rejecting zero or negative dimensions.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
            return Err(ChartError::InvalidSize { width, height });
        }
        Ok(Self { width: width as u32, height: height as u32 })
    }
    pub const fn width(&self) -> u32 { self.width }
    pub const fn height(&self) -> u32 { self.height }
}

impl Default for Size {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT }
    }
}

#[derive(Deserialize)]
struct RawSize {
    width: i64,
    height: i64,
}

impl TryFrom<RawSize> for Size {
    type Error = ChartError;
    fn try_from(raw: RawSize) -> Result<Self> {
        Size::new(raw.width, raw.height)
    }
}

/// Insets reserved around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    /// Create new margins (non-negative by type), CSS order.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(10, 10, 50, 70)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_rejects_non_positive_dimensions() {
        assert!(matches!(Size::new(0, 10), Err(ChartError::InvalidSize { width: 0, height: 10 })));
        assert!(Size::new(10, -1).is_err());
        let s = Size::new(40, 10).unwrap();
        assert_eq!((s.width(), s.height()), (40, 10));
    }

    #[test]
    fn size_deserialization_is_validated() {
        assert!(serde_json::from_str::<Size>(r#"{"width": 0, "height": 5}"#).is_err());
        let s: Size = serde_json::from_str(r#"{"width": 80, "height": 20}"#).unwrap();
        assert_eq!(s.width(), 80);
    }

    #[test]
    fn margin_defaults_reserve_axis_room() {
        let m = Margin::default();
        assert_eq!(m.hsum(), 80);
        assert_eq!(m.vsum(), 60);
    }
}
