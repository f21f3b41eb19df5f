//! Property identifiers.
//!
//! [CSS Cascading Level 4 § 1 Introduction](https://www.w3.org/TR/css-cascade-4/#intro)

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The longhand properties a styled node can carry.
///
/// The string form is the CSS property name (`border-left-width`), so ids can be
/// parsed from and printed as declarations directly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum PropertyId {
    BackgroundColor,
    BorderBottomColor,
    BorderBottomStyle,
    BorderBottomWidth,
    BorderLeftColor,
    BorderLeftStyle,
    BorderLeftWidth,
    BorderRightColor,
    BorderRightStyle,
    BorderRightWidth,
    BorderTopColor,
    BorderTopStyle,
    BorderTopWidth,
    Color,
    Display,
    Float,
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    Height,
    MarginBottom,
    MarginLeft,
    MarginRight,
    MarginTop,
    MaxHeight,
    MaxWidth,
    MinHeight,
    MinWidth,
    OutlineColor,
    OutlineStyle,
    OutlineWidth,
    PaddingBottom,
    PaddingLeft,
    PaddingRight,
    PaddingTop,
    TextDecorationLine,
    TextTransform,
    WhiteSpace,
    Width,
}

impl PropertyId {
    /// [§ 7.1 Initial Values](https://www.w3.org/TR/css-cascade-4/#initial-values)
    ///
    /// "Each property has an initial value, defined in the property's
    /// definition table."
    #[must_use]
    pub const fn initial_value(self) -> &'static str {
        match self {
            Self::BackgroundColor => "transparent",
            Self::BorderBottomColor
            | Self::BorderLeftColor
            | Self::BorderRightColor
            | Self::BorderTopColor
            | Self::OutlineColor => "currentcolor",
            Self::BorderBottomStyle
            | Self::BorderLeftStyle
            | Self::BorderRightStyle
            | Self::BorderTopStyle
            | Self::OutlineStyle
            | Self::Float
            | Self::TextDecorationLine
            | Self::TextTransform
            | Self::MaxHeight
            | Self::MaxWidth => "none",
            Self::BorderBottomWidth
            | Self::BorderLeftWidth
            | Self::BorderRightWidth
            | Self::BorderTopWidth
            | Self::OutlineWidth
            | Self::FontSize => "medium",
            Self::Color => "canvastext",
            Self::Display => "inline",
            Self::FontFamily => "",
            Self::FontStyle | Self::FontWeight | Self::WhiteSpace => "normal",
            Self::Height | Self::Width | Self::MinHeight | Self::MinWidth => "auto",
            Self::MarginBottom
            | Self::MarginLeft
            | Self::MarginRight
            | Self::MarginTop
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::PaddingRight
            | Self::PaddingTop => "0",
        }
    }

    /// [§ 7.2 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// "Inherited properties ... when there is no cascaded value, take the
    /// computed value of the parent element."
    #[must_use]
    pub const fn is_inherited(self) -> bool {
        matches!(
            self,
            Self::Color
                | Self::FontFamily
                | Self::FontSize
                | Self::FontStyle
                | Self::FontWeight
                | Self::TextTransform
                | Self::WhiteSpace
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_names_round_trip_through_kebab_case() {
        assert_eq!(PropertyId::BorderLeftWidth.to_string(), "border-left-width");
        assert_eq!(PropertyId::from_str("max-width"), Ok(PropertyId::MaxWidth));
        assert_eq!(PropertyId::from_str("Font-Size"), Ok(PropertyId::FontSize));
        assert!(PropertyId::from_str("grid-template-areas").is_err());
        let name: &'static str = PropertyId::WhiteSpace.into();
        assert_eq!(name, "white-space");
    }

    #[test]
    fn test_every_property_has_an_initial_value_except_font_family() {
        for id in PropertyId::iter() {
            if id != PropertyId::FontFamily {
                assert!(!id.initial_value().is_empty(), "{id} has no initial value");
            }
        }
    }

    #[test]
    fn test_display_is_not_inherited() {
        assert!(!PropertyId::Display.is_inherited());
        assert!(PropertyId::FontSize.is_inherited());
        assert!(PropertyId::WhiteSpace.is_inherited());
    }
}
