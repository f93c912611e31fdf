// File: crates/chart-core/src/color.rs
// Summary: 24-bit RGB color with hex/palette construction and palette-backed negation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::palette::Palette;

/// Opaque 24-bit RGB color. Channels are `u8`, so the [0,255] contract holds by type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(rgb: u32) -> Self {
        Self { r: (rgb >> 16) as u8, g: (rgb >> 8) as u8, b: rgb as u8 }
    }

    /// Parse six hex digits, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidColor(format!(
                "`{hex}` is not a color between #000000 and #FFFFFF"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ChartError::InvalidColor(format!("`{hex}`: {e}")))
        };
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    /// Build from integer channels, rejecting anything outside [0,255].
    pub fn from_channels(r: i32, g: i32, b: i32) -> Result<Self> {
        let check = |v: i32| {
            u8::try_from(v).map_err(|_| ChartError::InvalidColor(format!("channel {v} outside [0,255]")))
        };
        Ok(Self { r: check(r)?, g: check(g)?, b: check(b)? })
    }

    /// Uppercase hex without `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Palette entry with the same RGB value, if any.
    pub fn palette(&self) -> Option<Palette> {
        Palette::from_color(*self)
    }

    /// Paired contrasting palette color. Fails for colors outside the palette.
    pub fn negative(&self) -> Result<Color> {
        self.palette()
            .map(|p| p.negative().color())
            .ok_or_else(|| ChartError::InvalidColor(format!("#{} has no negative in the palette", self.to_hex())))
    }

    pub const fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba { color: self, alpha }
    }

    pub const fn opaque(self) -> Rgba {
        self.with_alpha(255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Palette::RichBlue.color()
    }
}

impl From<Palette> for Color {
    fn from(p: Palette) -> Self {
        p.color()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    /// Hex string or palette name (`"rich_blue"`, `"RICH-BLUE"`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(p) = Palette::find(trimmed) {
            return Ok(p.color());
        }
        Color::from_hex(trimmed)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Color plus alpha, used by layout for translucent fills (area, bubble, radar rings).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub color: Color,
    pub alpha: u8,
}

impl Rgba {
    /// Convert a 0 (opaque) .. 127 (transparent) alpha level to an 8-bit alpha channel.
    pub fn from_transparency(color: Color, level: u8) -> Self {
        let level = level.min(127) as f32;
        let alpha = (255.0 * (127.0 - level) / 127.0).round() as u8;
        Self { color, alpha }
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        c.opaque()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_normalizes_case() {
        for input in ["#4477aa", "4477AA", "#ffffff", "000000", "#0d6EfD"] {
            let c = Color::from_hex(input).unwrap();
            assert_eq!(c.to_hex(), input.trim_start_matches('#').to_ascii_uppercase());
        }
        assert_eq!(Color::from_hex("#4477AA").unwrap().to_string(), "#4477AA");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for bad in ["", "#12345", "#1234567", "GG0000", "#-10000"] {
            assert!(matches!(Color::from_hex(bad), Err(ChartError::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn out_of_range_channels_are_rejected() {
        assert!(Color::from_channels(256, 0, 0).is_err());
        assert!(Color::from_channels(0, -1, 0).is_err());
        assert_eq!(Color::from_channels(1, 2, 3).unwrap(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn palette_colors_negate_through_the_table() {
        let blue = Color::from(Palette::RichBlue);
        assert_eq!(blue.negative().unwrap(), Palette::GoldenOrange.color());
        assert_eq!(Color::from_hex("#FFFFFF").unwrap().negative().unwrap(), Color::rgb(0, 0, 0));
    }

    #[test]
    fn negating_a_non_palette_color_fails() {
        let odd = Color::rgb(1, 2, 3);
        assert!(matches!(odd.negative(), Err(ChartError::InvalidColor(_))));
    }

    #[test]
    fn parses_palette_names_and_hex() {
        assert_eq!("rich_blue".parse::<Color>().unwrap(), Palette::RichBlue.color());
        assert_eq!("#DC3545".parse::<Color>().unwrap(), Palette::Danger.color());
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn transparency_levels_map_to_alpha() {
        assert_eq!(Rgba::from_transparency(Color::rgb(0, 0, 0), 0).alpha, 255);
        assert_eq!(Rgba::from_transparency(Color::rgb(0, 0, 0), 127).alpha, 0);
        assert_eq!(Rgba::from_transparency(Color::rgb(0, 0, 0), 80).alpha, 94);
    }
}
