//! CSS Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The basic sixteen colors plus a handful of common extended ones.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x00_00_00),
    ("silver", 0xc0_c0_c0),
    ("gray", 0x80_80_80),
    ("grey", 0x80_80_80),
    ("white", 0xff_ff_ff),
    ("maroon", 0x80_00_00),
    ("red", 0xff_00_00),
    ("purple", 0x80_00_80),
    ("fuchsia", 0xff_00_ff),
    ("magenta", 0xff_00_ff),
    ("green", 0x00_80_00),
    ("lime", 0x00_ff_00),
    ("olive", 0x80_80_00),
    ("yellow", 0xff_ff_00),
    ("navy", 0x00_00_80),
    ("blue", 0x00_00_ff),
    ("teal", 0x00_80_80),
    ("aqua", 0x00_ff_ff),
    ("cyan", 0x00_ff_ff),
    ("orange", 0xff_a5_00),
    ("rebeccapurple", 0x66_33_99),
    ("lightgray", 0xd3_d3_d3),
    ("darkgray", 0xa9_a9_a9),
    ("brown", 0xa5_2a_2a),
    ("pink", 0xff_c0_cb),
];

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// White (#ffffff)
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// [§ 6.3 The transparent keyword](https://www.w3.org/TR/css-color-4/#transparent-color)
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Build an opaque color from `0xRRGGBB`.
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Parse any supported `<color>` except `currentcolor`, which depends on
    /// the element and is resolved by the styled node.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.starts_with('#') {
            return Self::from_hex(raw);
        }
        if let Some(open) = raw.find('(') {
            let name = raw[..open].trim().to_ascii_lowercase();
            let args = raw[open + 1..].strip_suffix(')')?;
            return match name.as_str() {
                "rgb" | "rgba" => Self::from_rgb_function(args),
                _ => None,
            };
        }
        Self::from_named(raw)
    }

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self { r: digit(0)?, g: digit(1)?, b: digit(2)?, a: 255 }),
            4 => Some(Self { r: digit(0)?, g: digit(1)?, b: digit(2)?, a: digit(3)? }),
            6 => Some(Self { r: pair(0)?, g: pair(2)?, b: pair(4)?, a: 255 }),
            8 => Some(Self { r: pair(0)?, g: pair(2)?, b: pair(4)?, a: pair(6)? }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            // [§ 6.2 System Colors](https://www.w3.org/TR/css-color-4/#css-system-colors)
            "canvastext" => return Some(Self::BLACK),
            "canvas" => return Some(Self::WHITE),
            _ => {}
        }
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, rgb)| Self::from_rgb(rgb))
    }

    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    ///
    /// Accepts both the legacy comma-separated and the modern
    /// space-separated syntax, with an optional alpha.
    fn from_rgb_function(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_ascii_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let value = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? * 255.0 / 100.0,
                None => s.parse::<f32>().ok()?,
            };
            Some(clamp_to_u8(value))
        };
        let alpha = match parts.get(3) {
            None => 255,
            Some(s) => match s.strip_suffix('%') {
                Some(pct) => clamp_to_u8(pct.parse::<f32>().ok()? * 255.0 / 100.0),
                None => clamp_to_u8(s.parse::<f32>().ok()? * 255.0),
            },
        };
        Some(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: alpha,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
