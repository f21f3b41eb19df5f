//! CSS Text values
//!
//! [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//! [CSS Text Decoration Module Level 3](https://www.w3.org/TR/css-text-decor-3/)

use serde::Serialize;
use strum_macros::EnumString;

/// [§ 2.1 Case Transforms: the text-transform property](https://www.w3.org/TR/css-text-3/#text-transform-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TextTransform {
    /// "No effects."
    #[default]
    None,
    /// "Puts the first typographic letter unit of each word, if lowercase,
    /// in titlecase; other characters are unaffected."
    Capitalize,
    /// "Puts all letters in uppercase."
    Uppercase,
    /// "Puts all letters in lowercase."
    Lowercase,
    /// "Puts all typographic character units in fullwidth form."
    FullWidth,
    /// "Converts all small Kana characters to the equivalent full-size Kana."
    FullSizeKana,
}

/// [§ 3 White Space and Wrapping: the white-space property](https://www.w3.org/TR/css-text-3/#white-space-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum WhiteSpace {
    /// Collapse whitespace, wrap lines.
    #[default]
    Normal,
    /// Preserve whitespace, no wrapping.
    Pre,
    /// Collapse whitespace, no wrapping.
    Nowrap,
    /// Preserve whitespace, wrap lines.
    PreWrap,
    /// Like `pre-wrap`, but preserved spaces take up space at line ends.
    BreakSpaces,
    /// Collapse spaces and tabs, preserve newlines, wrap lines.
    PreLine,
}

impl WhiteSpace {
    /// [§ 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
    ///
    /// Whether spaces and tabs are collapsible.
    #[must_use]
    pub const fn collapses_spaces(self) -> bool {
        matches!(self, Self::Normal | Self::Nowrap | Self::PreLine)
    }

    /// Whether segment breaks (newlines) are preserved as forced breaks.
    #[must_use]
    pub const fn preserves_newlines(self) -> bool {
        matches!(
            self,
            Self::Pre | Self::PreWrap | Self::BreakSpaces | Self::PreLine
        )
    }

    /// Whether lines may wrap at soft wrap opportunities.
    #[must_use]
    pub const fn wraps(self) -> bool {
        !matches!(self, Self::Pre | Self::Nowrap)
    }
}

/// [§ 2.1 Text Decoration Lines](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TextDecorationLine {
    /// "Neither produces nor inhibits text decoration."
    None,
    /// "Each line of text is underlined."
    Underline,
    /// "Each line of text has a line over it."
    Overline,
    /// "Each line of text has a line through the middle."
    LineThrough,
    /// Deprecated; accepted and ignored by renderers.
    Blink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_parse_kebab_case() {
        assert_eq!("pre-wrap".parse(), Ok(WhiteSpace::PreWrap));
        assert_eq!("NOWRAP".parse(), Ok(WhiteSpace::Nowrap));
        assert_eq!("full-size-kana".parse(), Ok(TextTransform::FullSizeKana));
        assert_eq!("line-through".parse(), Ok(TextDecorationLine::LineThrough));
        assert!("sideways".parse::<TextTransform>().is_err());
    }

    #[test]
    fn test_white_space_behaviour() {
        assert!(WhiteSpace::PreLine.collapses_spaces());
        assert!(WhiteSpace::PreLine.preserves_newlines());
        assert!(!WhiteSpace::Pre.wraps());
        assert!(!WhiteSpace::Nowrap.preserves_newlines());
    }
}
