//! Styled tree and typed CSS values
//!
//! This module implements the style side of layout per:
//! - [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/) (inheritance, CSS-wide keywords)
//! - [CSS Custom Properties Level 1](https://www.w3.org/TR/css-variables-1/)
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/)
//! - [CSS Text Level 3](https://www.w3.org/TR/css-text-3/)

mod property_id;
mod styled_node;
pub mod substitute;
mod values;

// Re-export all public types
pub use property_id::PropertyId;
pub use styled_node::{StyleTreeError, StyledId, StyledNode, StyledTree};
pub use values::{
    BorderStyle, Color, DEFAULT_FONT_SIZE_PX, Display, Float, FontStyle, FontWeight,
    LengthParseError, LengthValue, TextDecorationLine, TextTransform, WhiteSpace,
    absolute_size_keyword, parse_font_family,
};
