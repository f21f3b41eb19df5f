//! CSS Layout Engine
//!
//! This module implements the CSS Visual Formatting Model for laying out
//! a styled tree.
//!
//! # Relevant Specifications
//!
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Box dimensions, rectangles, and edge sizes
//! - [`values`] - Length resolution
//! - [`layout_box`] - Layout box types, box generation and layout algorithms
//! - [`inline`] - Font metrics and the line box model
//! - [`text`] - Whitespace collapsing and text-transform
//! - [`replaced`] - Replaced elements and their intrinsic sizes

pub mod box_model;
pub mod inline;
pub mod layout_box;
pub mod replaced;
pub mod text;
pub mod values;

// Re-exports for convenience
pub use box_model::{BoxDimensions, EdgeSizes, Rect};
pub use inline::{
    ApproximateFontMetrics, FontDescription, FontMetrics, InlineLayout, NoFontMetrics,
    TextMetrics,
};
pub use layout_box::{BoxType, LayoutBox};
pub use replaced::{NoReplacedSizing, ReplacedContent, ReplacedSizing, Size};
pub use text::{apply_text_transform, collapse_whitespace};
pub use values::{
    AutoEdgeSizes, BORDER_MEDIUM_PX, BORDER_THICK_PX, BORDER_THIN_PX, LengthContext,
    LengthKind, ResolvedLength, resolve_length, resolve_length_or_default,
};

use serde::Serialize;
use trellis_common::{Diagnostics, Warning};

use crate::style::StyledTree;

use inline::Measurer;
use layout_box::{ContainingBlock, LayoutContext};

/// The result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOutput<'a> {
    /// The root box, or `None` if the root generates no box.
    pub root: Option<LayoutBox<'a>>,
    /// Every distinct problem found while resolving styles, in first-seen
    /// order.
    #[serde(skip)]
    pub warnings: Vec<Warning>,
}

/// Lay out `tree` in a containing block `width` pixels wide, with
/// approximate font metrics and no intrinsic sizes for replaced elements.
///
/// Returns `None` when the root generates no box (`display: none`).
#[must_use]
pub fn create_layout<'a>(tree: &'a StyledTree<'_>, width: f32) -> Option<LayoutBox<'a>> {
    create_layout_with(tree, width, &ApproximateFontMetrics, &NoReplacedSizing)
}

/// [`create_layout`] with caller-supplied text measurement and replaced
/// element sizing.
#[must_use]
pub fn create_layout_with<'a>(
    tree: &'a StyledTree<'_>,
    width: f32,
    metrics: &dyn FontMetrics,
    sizing: &dyn ReplacedSizing,
) -> Option<LayoutBox<'a>> {
    create_layout_with_diagnostics(tree, width, metrics, sizing).root
}

/// [`create_layout_with`], also returning the warnings recorded along the
/// way. Each call owns its own warning collector.
///
/// A negative or NaN `width` is treated as 0.
#[must_use]
pub fn create_layout_with_diagnostics<'a>(
    tree: &'a StyledTree<'_>,
    width: f32,
    metrics: &dyn FontMetrics,
    sizing: &dyn ReplacedSizing,
) -> LayoutOutput<'a> {
    let diag = Diagnostics::new();
    let root = {
        let cx = LayoutContext {
            measurer: Measurer::new(metrics, &diag),
            sizing,
            diag: &diag,
        };
        LayoutBox::build_root(tree.root(), &cx).map(|mut root| {
            root.layout(ContainingBlock::initial(width.max(0.0)), &cx);
            root
        })
    };
    LayoutOutput {
        root,
        warnings: diag.into_warnings(),
    }
}
