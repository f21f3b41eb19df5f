//! CSS Display and Float values
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use serde::Serialize;
use strum_macros::EnumString;

/// The outer display role a box takes in flow layout.
///
/// Only flow layout is supported, so every inner display type collapses onto
/// its outer role: `flex`, `grid` and `table` lay out as blocks, and their
/// `inline-*` forms as inline boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Display {
    /// "The element and its descendants generate no boxes or text runs."
    None,
    /// "The element generates an inline-level box when placed in flow layout."
    #[default]
    Inline,
    /// "The element generates a block-level box when placed in flow layout."
    Block,
}

impl Display {
    /// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
    ///
    /// Parse a display keyword, or a two-value `<display-outside> <display-inside>`
    /// pair, returning `None` for anything unrecognised.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        let outer = lower.split_ascii_whitespace().next()?;
        match outer {
            "none" => Some(Self::None),
            "block" | "list-item" | "flow-root" | "flex" | "grid" | "table" => Some(Self::Block),
            "inline" | "inline-block" | "inline-flex" | "inline-grid" | "inline-table" => {
                Some(Self::Inline)
            }
            _ => None,
        }
    }

    /// Returns true for block-level boxes.
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// [§ 9.5.1 Positioning the float: the 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
///
/// Exposed for painters and future layout; floats are laid out in normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Float {
    /// "The box is not floated."
    #[default]
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "Similar to 'left', except the box is floated to the right."
    Right,
    /// Float to the start side of the line.
    InlineStart,
    /// Float to the end side of the line.
    InlineEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keywords() {
        assert_eq!(Display::parse("block"), Some(Display::Block));
        assert_eq!(Display::parse(" INLINE "), Some(Display::Inline));
        assert_eq!(Display::parse("inline-block"), Some(Display::Inline));
        assert_eq!(Display::parse("list-item"), Some(Display::Block));
        assert_eq!(Display::parse("block flow"), Some(Display::Block));
        assert_eq!(Display::parse("none"), Some(Display::None));
        assert_eq!(Display::parse("blocky"), None);
        assert_eq!(Display::parse(""), None);
    }

    #[test]
    fn test_float_keywords() {
        assert_eq!("inline-start".parse(), Ok(Float::InlineStart));
        assert_eq!("none".parse(), Ok(Float::None));
    }
}
