//! CSS Border values
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use serde::Serialize;
use strum_macros::EnumString;

/// [§ 4.2 Line Patterns: the border-style properties](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum BorderStyle {
    /// "No border. Color and width are ignored."
    #[default]
    None,
    /// "Same as none, but has different behavior in the border conflict
    /// resolution rules for border-collapsed tables."
    Hidden,
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    /// [§ 4.3 Line Thickness: the border-width properties](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    ///
    /// "Computed value: absolute length, snapped as a border width; zero if
    /// the border style is none or hidden"
    #[must_use]
    pub const fn draws_border(self) -> bool {
        !matches!(self, Self::None | Self::Hidden)
    }
}
