// File: crates/chart-core/src/palette.rs
// Summary: Named palette, color groups and the static negative-color table.

use crate::color::Color;

macro_rules! palette {
    ($($variant:ident = $hex:literal, $name:literal;)*) => {
        /// Named palette entries. Each maps to a fixed RGB value.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Palette {
            $($variant,)*
        }

        impl Palette {
            pub const ALL: &'static [Palette] = &[$(Palette::$variant,)*];

            pub const fn color(self) -> Color {
                match self {
                    $(Palette::$variant => Color::from_u32($hex),)*
                }
            }

            /// Lowercase snake_case name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Palette::$variant => $name,)*
                }
            }
        }
    };
}

palette! {
    White = 0xFFFFFF, "white";
    Black = 0x000000, "black";
    Red = 0xFF0000, "red";
    Green = 0x00FF00, "green";
    Blue = 0x0000FF, "blue";

    Primary = 0x0D6EFD, "primary";
    Secondary = 0x6C757D, "secondary";
    Success = 0x198754, "success";
    Info = 0x0DCAF0, "info";
    Warning = 0xFFC107, "warning";
    Danger = 0xDC3545, "danger";
    Light = 0xF8F9FA, "light";
    Dark = 0x212529, "dark";

    Indigo = 0x6610F2, "indigo";
    MintGreen = 0xAAF0D1, "mint_green";
    LightBlue = 0x7986CB, "light_blue";
    Purple = 0xB07AA1, "purple";
    Pink = 0xFF9DA7, "pink";
    Yellow = 0xEDC948, "yellow";
    LightOrange = 0xFFB74D, "light_orange";
    Teal = 0x76B7B2, "teal";
    Lavender = 0xB39DDB, "lavender";
    Sage = 0x6B8E4E, "sage";
    LimeGreen = 0xC0CA33, "lime_green";
    LavenderBlue = 0xA7B6DD, "lavender_blue";

    VividRed = 0xFF4136, "vivid_red";
    VividGreen = 0x2ECC40, "vivid_green";
    VividOrange = 0xFF851B, "vivid_orange";
    VividBlue = 0x7FDBFF, "vivid_blue";
    VividPurple = 0xB10DC9, "vivid_purple";
    VividTurquoise = 0x39CCCC, "vivid_turquoise";
    VividLime = 0x01FF70, "vivid_lime";
    VividMagenta = 0xF012BE, "vivid_magenta";
    VividCoral = 0xFF6F61, "vivid_coral";
    BrightTeal = 0x50E3C2, "bright_teal";
    BrightYellow = 0xFFEB3B, "bright_yellow";
    BrightPink = 0xF50057, "bright_pink";

    ForestGreen = 0x66AA55, "forest_green";
    OliveGreen = 0x3D9970, "olive_green";
    Moss = 0x5E8C6F, "moss";
    Burgundy = 0xAA4466, "burgundy";
    Wine = 0x994455, "wine";
    Sienna = 0x9B4E34, "sienna";
    Terracotta = 0xBC5C45, "terracotta";
    BrickRed = 0xC0392B, "brick_red";
    Rust = 0xCD6844, "rust";
    EarthBrown = 0x705D56, "earth_brown";
    DeepGreen = 0x264D59, "deep_green";
    Sand = 0xD8C59A, "sand";

    RichBlue = 0x4477AA, "rich_blue";
    WarmRed = 0xDD4477, "warm_red";
    DeepOrange = 0xE67C3A, "deep_orange";
    RoyalPurple = 0x8866AA, "royal_purple";
    OceanTeal = 0x44AAAA, "ocean_teal";
    SlateBlue = 0x4B6A88, "slate_blue";
    Denim = 0x4167B1, "denim";
    SteelBlue = 0x4A7B9D, "steel_blue";
    Copper = 0xB87333, "copper";
    Navy = 0x344F7C, "navy";
    Emerald = 0x3C8C5E, "emerald";
    GoldenOrange = 0xF39C12, "golden_orange";
}

impl Palette {
    /// Contrasting partner used for negative values (waterfall decreases).
    pub const fn negative(self) -> Palette {
        use Palette::*;
        match self {
            White => Black,
            Black => White,
            Red => Green,
            Green => Red,
            Blue => Red,

            Primary => Warning,
            Secondary => Light,
            Success => Danger,
            Info => Danger,
            Warning => Primary,
            Danger => Success,
            Light => Dark,
            Dark => Light,

            Indigo => Lavender,
            MintGreen => Pink,
            LightBlue => LightOrange,
            Purple => Yellow,
            Pink => MintGreen,
            Yellow => Purple,
            LightOrange => LightBlue,
            Teal => LimeGreen,
            Lavender => Indigo,
            Sage => LavenderBlue,
            LimeGreen => Teal,
            LavenderBlue => Sage,

            VividRed => VividGreen,
            VividGreen => VividRed,
            VividOrange => VividBlue,
            VividBlue => VividOrange,
            VividPurple => VividLime,
            VividTurquoise => VividMagenta,
            VividLime => VividPurple,
            VividMagenta => VividTurquoise,
            VividCoral => BrightTeal,
            BrightTeal => VividCoral,
            BrightYellow => BrightPink,
            BrightPink => BrightYellow,

            ForestGreen => BrickRed,
            OliveGreen => Burgundy,
            Moss => Rust,
            Burgundy => OliveGreen,
            Wine => EarthBrown,
            Sienna => DeepGreen,
            Terracotta => Sand,
            BrickRed => ForestGreen,
            Rust => Moss,
            EarthBrown => Wine,
            DeepGreen => Sienna,
            Sand => Terracotta,

            RichBlue => GoldenOrange,
            WarmRed => OceanTeal,
            DeepOrange => Emerald,
            RoyalPurple => SteelBlue,
            OceanTeal => WarmRed,
            SlateBlue => Copper,
            Denim => Navy,
            SteelBlue => RoyalPurple,
            Copper => SlateBlue,
            Navy => Denim,
            Emerald => DeepOrange,
            GoldenOrange => RichBlue,
        }
    }

    pub fn from_color(color: Color) -> Option<Palette> {
        Self::ALL.iter().copied().find(|p| p.color() == color)
    }

    /// Find an entry by name, ignoring case and treating `-`/space as `_`.
    pub fn find(name: &str) -> Option<Palette> {
        let wanted: String = name
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        Self::ALL.iter().copied().find(|p| p.name() == wanted)
    }

    /// Deterministic color by index, cycling through `group`.
    pub fn by_index(index: usize, group: ColorGroup) -> Palette {
        let colors = group.colors();
        colors[index % colors.len()]
    }
}

/// Twelve-color groups used for index-based fallbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorGroup {
    Pastel,
    Vibrant,
    Natural,
    #[default]
    Professional,
}

impl ColorGroup {
    pub const fn colors(self) -> &'static [Palette] {
        use Palette::*;
        match self {
            ColorGroup::Pastel => &[
                Indigo, MintGreen, LightBlue, Purple, Pink, Yellow,
                LightOrange, Teal, Lavender, Sage, LimeGreen, LavenderBlue,
            ],
            ColorGroup::Vibrant => &[
                VividRed, VividGreen, VividOrange, VividBlue, VividPurple, VividTurquoise,
                VividLime, VividMagenta, VividCoral, BrightTeal, BrightYellow, BrightPink,
            ],
            ColorGroup::Natural => &[
                ForestGreen, OliveGreen, Moss, Burgundy, Wine, Sienna,
                Terracotta, BrickRed, Rust, EarthBrown, DeepGreen, Sand,
            ],
            ColorGroup::Professional => &[
                RichBlue, WarmRed, DeepOrange, RoyalPurple, OceanTeal, SlateBlue,
                Denim, SteelBlue, Copper, Navy, Emerald, GoldenOrange,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_negative_is_a_palette_entry() {
        for p in Palette::ALL {
            assert!(Palette::ALL.contains(&p.negative()), "{p:?}");
        }
    }

    #[test]
    fn colors_are_unique() {
        for (i, a) in Palette::ALL.iter().enumerate() {
            for b in &Palette::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn by_index_cycles_through_group() {
        assert_eq!(Palette::by_index(0, ColorGroup::Professional), Palette::RichBlue);
        assert_eq!(Palette::by_index(12, ColorGroup::Professional), Palette::RichBlue);
        assert_eq!(Palette::by_index(13, ColorGroup::Vibrant), Palette::VividGreen);
    }

    #[test]
    fn find_is_lenient_about_case_and_separators() {
        assert_eq!(Palette::find("Golden-Orange"), Some(Palette::GoldenOrange));
        assert_eq!(Palette::find("rich blue"), Some(Palette::RichBlue));
        assert_eq!(Palette::find("chartreuse"), None);
    }
}
