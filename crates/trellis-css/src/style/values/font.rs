//! CSS Font values
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

use serde::Serialize;
use strum_macros::EnumString;

/// User agent default font size.
/// [§ 2.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 2.5.1 Absolute size keyword mapping table](https://drafts.csswg.org/css-fonts-4/#absolute-size-mapping)
///
/// Scaling factor relative to `medium` for each `<absolute-size>` keyword.
#[must_use]
pub fn absolute_size_keyword(keyword: &str) -> Option<f32> {
    let factor = match keyword.to_ascii_lowercase().as_str() {
        "xx-small" => 3.0 / 5.0,
        "x-small" => 3.0 / 4.0,
        "small" => 8.0 / 9.0,
        "medium" => 1.0,
        "large" => 6.0 / 5.0,
        "x-large" => 3.0 / 2.0,
        "xx-large" => 2.0,
        "xxx-large" => 3.0,
        _ => return None,
    };
    Some(DEFAULT_FONT_SIZE_PX * factor)
}

/// [§ 2.1 font-family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
///
/// Split a comma-separated family list, trimming whitespace and quotes.
#[must_use]
pub fn parse_font_family(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|family| {
            family
                .trim_matches(|c: char| c.is_ascii_whitespace() || c == '\'' || c == '"')
                .to_string()
        })
        .filter(|family| !family.is_empty())
        .collect()
}

/// [§ 2.4 font-style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FontStyle {
    /// "Matches against a face that is classified as a normal face"
    #[default]
    Normal,
    /// "Matches against a font that is labeled as an italic face"
    Italic,
    /// "Matches against a font that is labeled as an oblique face"
    Oblique,
}

/// [§ 2.2 font-weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// Numeric weight in the range 1-1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// "Same as 400."
    pub const NORMAL: Self = Self(400);
    /// "Same as 700."
    pub const BOLD: Self = Self(700);

    /// Parse an absolute weight: `normal`, `bold` or a number in 1-1000.
    /// Relative keywords are handled by [`FontWeight::bolder`] and
    /// [`FontWeight::lighter`] since they need the parent weight.
    #[must_use]
    pub fn parse_absolute(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "normal" => Some(Self::NORMAL),
            "bold" => Some(Self::BOLD),
            number => number
                .parse::<u16>()
                .ok()
                .filter(|w| (1..=1000).contains(w))
                .map(Self),
        }
    }

    /// [§ 2.2.1 Relative Weights](https://www.w3.org/TR/css-fonts-4/#relative-weights)
    #[must_use]
    pub const fn bolder(self) -> Self {
        match self.0 {
            0..350 => Self(400),
            350..550 => Self(700),
            550..900 => Self(900),
            _ => self,
        }
    }

    /// [§ 2.2.1 Relative Weights](https://www.w3.org/TR/css-fonts-4/#relative-weights)
    #[must_use]
    pub const fn lighter(self) -> Self {
        match self.0 {
            0..100 => self,
            100..550 => Self(100),
            550..750 => Self(400),
            _ => Self(700),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}
