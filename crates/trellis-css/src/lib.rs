//! Styled tree and box layout for the Trellis engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Styled tree** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Arena of styled nodes with parent back-references
//!   - Typed property accessors with inheritance and CSS-wide keywords
//!   - Custom properties and `var()` substitution
//!
//! - **Length resolution** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - `px`, `em`, `rem` and percentages
//!   - `auto`, `none` and border-width keywords
//!
//! - **Layout Engine** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Box generation with anonymous block boxes
//!   - Block width, height, margin, border and padding resolution
//!   - Inline formatting: whitespace collapsing, text-transform, line breaking
//!
//! # Not Implemented
//!
//! - Selector matching and the cascade (styled nodes arrive already cascaded)
//! - Floats, positioning, flexbox and grid
//! - Bidirectional text and vertical writing modes

/// Box model and layout per [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Styled tree and typed property values.
pub mod style;

pub use layout::{
    ApproximateFontMetrics, BoxDimensions, BoxType, EdgeSizes, FontDescription, FontMetrics,
    LayoutBox, LayoutOutput, LengthContext, LengthKind, NoFontMetrics, NoReplacedSizing, Rect,
    ReplacedContent, ReplacedSizing, ResolvedLength, Size, TextMetrics, create_layout,
    create_layout_with, create_layout_with_diagnostics, resolve_length,
};
pub use style::{
    BorderStyle, Color, Display, Float, FontStyle, FontWeight, PropertyId, StyleTreeError,
    StyledId, StyledNode, StyledTree, TextDecorationLine, TextTransform, WhiteSpace,
};
