//! Replaced elements.
//!
//! [§ 3.1 Replaced elements](https://www.w3.org/TR/CSS2/conform.html#replaced-element)
//!
//! "An element whose content is outside the scope of the CSS formatting
//! model, such as an image, embedded document, or applet."
//!
//! Layout never loads resources. The caller answers "how big is this image?"
//! through [`ReplacedSizing`]; without an answer the element shows its `alt`
//! text, or nothing.

use serde::Serialize;
use trellis_dom::ElementData;

/// A width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// "if 'width' has a computed value of 'auto', and the element has an
/// intrinsic width, then that intrinsic width is the used value of 'width'."
///
/// Supplies intrinsic sizes for replaced elements. Any
/// `Fn(&ElementData) -> Option<Size>` closure works.
pub trait ReplacedSizing {
    /// The intrinsic size of `element`, or `None` if it has none.
    fn intrinsic_size(&self, element: &ElementData) -> Option<Size>;
}

impl<F> ReplacedSizing for F
where
    F: Fn(&ElementData) -> Option<Size>,
{
    fn intrinsic_size(&self, element: &ElementData) -> Option<Size> {
        self(element)
    }
}

/// No replaced element has an intrinsic size.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReplacedSizing;

impl ReplacedSizing for NoReplacedSizing {
    fn intrinsic_size(&self, _element: &ElementData) -> Option<Size> {
        None
    }
}

/// What a replaced box displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReplacedContent {
    /// The resource, at its intrinsic size.
    Sized(Size),
    /// No intrinsic size; the element's `alt` text stands in.
    Alt(String),
    /// Neither.
    Empty,
}

impl ReplacedContent {
    /// Decide the content of an `<img>` element.
    #[must_use]
    pub fn for_element(element: &ElementData, sizing: &dyn ReplacedSizing) -> Self {
        if let Some(size) = sizing.intrinsic_size(element) {
            return Self::Sized(size);
        }
        match element.attr("alt") {
            Some(alt) if !alt.is_empty() => Self::Alt(alt.to_string()),
            _ => Self::Empty,
        }
    }

    /// Returns true if `element` generates a replaced box.
    #[must_use]
    pub fn is_replaced(element: &ElementData) -> bool {
        element.is("img")
    }
}
