//! CSS Length values and parsing
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use serde::Serialize;
use thiserror::Error;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px(f32),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f32),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the root element."
    Rem(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    /// "A <percentage> value is denoted by <percentage>, and consists of a
    /// <number> immediately followed by a percent sign '%'."
    Percent(f32),
}

/// Why a raw string is not a `<length>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthParseError {
    /// No leading number at all (`asdf`, `auto` where not allowed).
    #[error("not a number")]
    NotANumber,
    /// A number followed by an unknown unit (`0notarealunit`).
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
}

impl LengthValue {
    /// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
    ///
    /// Parse `<number><unit>` or `<number>%`. Units are ASCII case-insensitive.
    ///
    /// [§ 4.2 Numbers](https://www.w3.org/TR/css-values-4/#lengths)
    /// "for zero lengths the unit identifier is optional"
    ///
    /// # Errors
    ///
    /// Returns [`LengthParseError`] if the text has no leading number or the
    /// unit is not one of `px`, `em`, `rem`, `%`.
    pub fn parse(raw: &str) -> Result<Self, LengthParseError> {
        let raw = raw.trim();
        let split = numeric_prefix_len(raw);
        let (number, unit) = raw.split_at(split);
        let value: f32 = number.parse().map_err(|_| LengthParseError::NotANumber)?;

        if unit.is_empty() {
            return if value == 0.0 {
                Ok(Self::Px(0.0))
            } else {
                Err(LengthParseError::UnknownUnit(String::new()))
            };
        }

        match unit.to_ascii_lowercase().as_str() {
            "px" => Ok(Self::Px(value)),
            "em" => Ok(Self::Em(value)),
            "rem" => Ok(Self::Rem(value)),
            "%" => Ok(Self::Percent(value)),
            _ => Err(LengthParseError::UnknownUnit(unit.to_string())),
        }
    }

    /// Resolve to pixels.
    ///
    /// `containing` is the containing-block dimension percentages refer to, or
    /// `None` when that dimension is not yet known, in which case a percentage
    /// resolves to 0.
    #[must_use]
    pub fn to_px(self, containing: Option<f32>, font_size: f32, root_font_size: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Em(em) => em * font_size,
            Self::Rem(rem) => rem * root_font_size,
            Self::Percent(pct) => containing.map_or(0.0, |c| c * pct / 100.0),
        }
    }

    /// Returns true for percentages.
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

/// Length in bytes of the `[+-]?digits[.digits]` prefix of `s`.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(LengthValue::parse("10px"), Ok(LengthValue::Px(10.0)));
        assert_eq!(LengthValue::parse(" 1.5EM "), Ok(LengthValue::Em(1.5)));
        assert_eq!(LengthValue::parse("2rem"), Ok(LengthValue::Rem(2.0)));
        assert_eq!(LengthValue::parse("50%"), Ok(LengthValue::Percent(50.0)));
        assert_eq!(LengthValue::parse("-4px"), Ok(LengthValue::Px(-4.0)));
        assert_eq!(LengthValue::parse("0"), Ok(LengthValue::Px(0.0)));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(LengthValue::parse("asdf"), Err(LengthParseError::NotANumber));
        assert_eq!(LengthValue::parse(""), Err(LengthParseError::NotANumber));
        assert_eq!(
            LengthValue::parse("0notarealunit"),
            Err(LengthParseError::UnknownUnit("notarealunit".to_string()))
        );
        assert_eq!(
            LengthValue::parse("12"),
            Err(LengthParseError::UnknownUnit(String::new()))
        );
    }

    #[test]
    fn test_to_px() {
        assert_eq!(LengthValue::Px(7.0).to_px(None, 10.0, 16.0), 7.0);
        assert_eq!(LengthValue::Em(10.0).to_px(None, 10.0, 16.0), 100.0);
        assert_eq!(LengthValue::Rem(2.0).to_px(None, 10.0, 16.0), 32.0);
        assert_eq!(LengthValue::Percent(50.0).to_px(Some(500.0), 10.0, 16.0), 250.0);
        assert_eq!(LengthValue::Percent(50.0).to_px(None, 10.0, 16.0), 0.0);
    }
}
