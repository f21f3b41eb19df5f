//! Typed CSS values produced by the styled-node accessors.

mod border;
mod color;
mod display;
mod font;
mod length;
mod text;

pub use border::BorderStyle;
pub use color::Color;
pub use display::{Display, Float};
pub use font::{
    DEFAULT_FONT_SIZE_PX, FontStyle, FontWeight, absolute_size_keyword, parse_font_family,
};
pub use length::{LengthParseError, LengthValue};
pub use text::{TextDecorationLine, TextTransform, WhiteSpace};
