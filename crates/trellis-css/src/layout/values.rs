//! Length resolution: from declared values to used pixel values.
//!
//! [§ 6 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
//!
//! Resolution never fails from layout's point of view. [`resolve_length`]
//! reports what was wrong with a value; [`resolve_length_or_default`] records
//! that as a warning and substitutes the value the property would have had
//! without the bad declaration.

use trellis_common::{Diagnostics, Warning};

use crate::style::{DEFAULT_FONT_SIZE_PX, LengthParseError, LengthValue, PropertyId, StyledNode};

use super::box_model::EdgeSizes;

/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// "Some properties can take the keyword 'auto' as a value. This keyword
/// allows the user agent to compute the value based on other properties."
///
/// A length after resolution: `auto`, the unbounded `none` of the max-size
/// properties, or pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ResolvedLength {
    /// The value is 'auto' and must be resolved during layout.
    #[default]
    Auto,
    /// `none` on `max-width`/`max-height`: no upper bound.
    Unbounded,
    /// The value is a specific length in pixels.
    Px(f32),
}

impl ResolvedLength {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Get the length value, or a default if it is not a length.
    #[must_use]
    pub const fn to_px_or(&self, default: f32) -> f32 {
        match self {
            Self::Px(v) => *v,
            Self::Auto | Self::Unbounded => default,
        }
    }

    /// The value as an upper bound: `none` compares as +infinity.
    #[must_use]
    pub const fn as_max_bound(&self) -> f32 {
        self.to_px_or(f32::INFINITY)
    }
}

/// Which family of property a length belongs to. Decides the keywords a
/// value may use and what an invalid value falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    /// `width`, `height`: `auto` allowed.
    Size,
    /// `min-width`, `min-height`: `auto` means 0.
    MinSize,
    /// `max-width`, `max-height`: `none` means unbounded.
    MaxSize,
    /// `margin-*`: `auto` allowed, negative values allowed.
    Margin,
    /// `padding-*`
    Padding,
    /// `border-*-width`: `thin`, `medium`, `thick` allowed.
    BorderWidth,
}

impl LengthKind {
    /// The value used in place of a missing or invalid declaration.
    #[must_use]
    pub const fn fallback(self) -> ResolvedLength {
        match self {
            Self::Size => ResolvedLength::Auto,
            Self::MaxSize => ResolvedLength::Unbounded,
            Self::MinSize | Self::Margin | Self::Padding | Self::BorderWidth => {
                ResolvedLength::Px(0.0)
            }
        }
    }
}

/// [§ 4.3.2 Line width](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-width)
///
/// "The thin, medium, and thick keywords are equivalent to 1px, 3px, and
/// 5px, respectively." This engine uses its own fixed ladder.
pub const BORDER_THIN_PX: f32 = 3.0;
/// `medium` border width.
pub const BORDER_MEDIUM_PX: f32 = 5.0;
/// `thick` border width.
pub const BORDER_THICK_PX: f32 = 7.0;

/// The inputs a length needs besides its own text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthContext {
    /// The containing-block dimension percentages refer to, `None` if it is
    /// not known yet (an auto-height containing block).
    pub containing: Option<f32>,
    /// The element's own computed font size, for `em`.
    pub font_size: f32,
    /// The root element's computed font size, for `rem`.
    pub root_font_size: f32,
}

/// [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
///
/// Resolve a raw declared value to a used length.
///
/// Percentages against an unknown containing dimension resolve to 0, or to
/// unbounded for the max-size properties. Negative values are clamped to 0
/// for every kind except margins.
///
/// # Errors
///
/// Returns the parse error if the value is neither a length nor a keyword
/// valid for `kind`.
pub fn resolve_length(
    raw: &str,
    kind: LengthKind,
    ctx: &LengthContext,
) -> Result<ResolvedLength, LengthParseError> {
    let keyword = raw.trim().to_ascii_lowercase();
    match (kind, keyword.as_str()) {
        (LengthKind::Size | LengthKind::Margin, "auto") => return Ok(ResolvedLength::Auto),
        // [§ 4.1 Automatic Minimum Size](https://www.w3.org/TR/css-sizing-3/#min-size-auto)
        // "For ... boxes that are not flex items ... auto computes to zero."
        (LengthKind::MinSize, "auto") => return Ok(ResolvedLength::Px(0.0)),
        (LengthKind::MaxSize, "none") => return Ok(ResolvedLength::Unbounded),
        (LengthKind::BorderWidth, "thin") => return Ok(ResolvedLength::Px(BORDER_THIN_PX)),
        (LengthKind::BorderWidth, "medium") => return Ok(ResolvedLength::Px(BORDER_MEDIUM_PX)),
        (LengthKind::BorderWidth, "thick") => return Ok(ResolvedLength::Px(BORDER_THICK_PX)),
        _ => {}
    }

    let length = LengthValue::parse(&keyword)?;
    if length.is_percent() && ctx.containing.is_none() {
        return Ok(match kind {
            LengthKind::MaxSize => ResolvedLength::Unbounded,
            _ => ResolvedLength::Px(0.0),
        });
    }

    let px = length.to_px(ctx.containing, ctx.font_size, ctx.root_font_size);
    Ok(ResolvedLength::Px(match kind {
        LengthKind::Margin => px,
        _ => px.max(0.0),
    }))
}

/// [`resolve_length`], with failures recorded in `diag` and replaced by
/// [`LengthKind::fallback`].
pub fn resolve_length_or_default(
    property: PropertyId,
    raw: &str,
    kind: LengthKind,
    ctx: &LengthContext,
    diag: &Diagnostics,
) -> ResolvedLength {
    match resolve_length(raw, kind, ctx) {
        Ok(length) => length,
        Err(LengthParseError::UnknownUnit(unit)) if !unit.is_empty() => {
            diag.warn(Warning::UnsupportedUnit {
                property: property.to_string(),
                unit,
                value: raw.to_string(),
            });
            kind.fallback()
        }
        Err(_) => {
            diag.warn(Warning::InvalidLength {
                property: property.to_string(),
                value: raw.to_string(),
            });
            kind.fallback()
        }
    }
}

/// [§ 8 Box model](https://www.w3.org/TR/CSS2/box.html)
///
/// Edge values where each side can be 'auto' or a specific length.
/// Used for margins where 'auto' has special meaning (centering).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoEdgeSizes {
    /// Top edge value.
    pub top: ResolvedLength,
    /// Right edge value.
    pub right: ResolvedLength,
    /// Bottom edge value.
    pub bottom: ResolvedLength,
    /// Left edge value.
    pub left: ResolvedLength,
}

const MARGINS: [PropertyId; 4] = [
    PropertyId::MarginTop,
    PropertyId::MarginRight,
    PropertyId::MarginBottom,
    PropertyId::MarginLeft,
];
const PADDINGS: [PropertyId; 4] = [
    PropertyId::PaddingTop,
    PropertyId::PaddingRight,
    PropertyId::PaddingBottom,
    PropertyId::PaddingLeft,
];
const BORDER_WIDTHS: [PropertyId; 4] = [
    PropertyId::BorderTopWidth,
    PropertyId::BorderRightWidth,
    PropertyId::BorderBottomWidth,
    PropertyId::BorderLeftWidth,
];
const BORDER_STYLES: [PropertyId; 4] = [
    PropertyId::BorderTopStyle,
    PropertyId::BorderRightStyle,
    PropertyId::BorderBottomStyle,
    PropertyId::BorderLeftStyle,
];

/// The box-model properties of one box, read through the length resolver.
///
/// Anonymous boxes have no styled node; every property then takes its
/// initial value.
#[derive(Clone, Copy)]
pub(crate) struct BoxStyle<'a, 'c> {
    node: Option<StyledNode<'a>>,
    diag: &'c Diagnostics,
    font_size: f32,
    root_font_size: f32,
}

impl<'a, 'c> BoxStyle<'a, 'c> {
    pub(crate) fn new(node: Option<StyledNode<'a>>, diag: &'c Diagnostics) -> Self {
        let (font_size, root_font_size) = node.map_or(
            (DEFAULT_FONT_SIZE_PX, DEFAULT_FONT_SIZE_PX),
            |n| (n.font_size(diag), n.root_font_size(diag)),
        );
        Self {
            node,
            diag,
            font_size,
            root_font_size,
        }
    }

    /// Resolve one length-valued property.
    pub(crate) fn length(
        &self,
        property: PropertyId,
        kind: LengthKind,
        containing: Option<f32>,
    ) -> ResolvedLength {
        let Some(node) = self.node else {
            return kind.fallback();
        };
        let raw = node.get_raw_property(property, self.diag);
        let ctx = LengthContext {
            containing,
            font_size: self.font_size,
            root_font_size: self.root_font_size,
        };
        resolve_length_or_default(property, &raw, kind, &ctx, self.diag)
    }

    pub(crate) fn width(&self, containing_width: f32) -> ResolvedLength {
        self.length(PropertyId::Width, LengthKind::Size, Some(containing_width))
    }

    pub(crate) fn min_width(&self, containing_width: f32) -> f32 {
        self.length(PropertyId::MinWidth, LengthKind::MinSize, Some(containing_width))
            .to_px_or(0.0)
    }

    pub(crate) fn max_width(&self, containing_width: f32) -> f32 {
        self.length(PropertyId::MaxWidth, LengthKind::MaxSize, Some(containing_width))
            .as_max_bound()
    }

    /// [§ 10.5 Content height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    ///
    /// "The percentage is calculated with respect to the height of the
    /// generated box's containing block."
    pub(crate) fn height(&self, containing_height: Option<f32>) -> ResolvedLength {
        self.length(PropertyId::Height, LengthKind::Size, containing_height)
    }

    pub(crate) fn min_height(&self, containing_height: Option<f32>) -> f32 {
        self.length(PropertyId::MinHeight, LengthKind::MinSize, containing_height)
            .to_px_or(0.0)
    }

    pub(crate) fn max_height(&self, containing_height: Option<f32>) -> f32 {
        self.length(PropertyId::MaxHeight, LengthKind::MaxSize, containing_height)
            .as_max_bound()
    }

    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    ///
    /// "The percentage is calculated with respect to the width of the
    /// generated box's containing block. Note that this is true for
    /// 'margin-top' and 'margin-bottom' as well."
    pub(crate) fn margin(&self, containing_width: f32) -> AutoEdgeSizes {
        let [top, right, bottom, left] =
            MARGINS.map(|p| self.length(p, LengthKind::Margin, Some(containing_width)));
        AutoEdgeSizes {
            top,
            right,
            bottom,
            left,
        }
    }

    /// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    pub(crate) fn padding(&self, containing_width: f32) -> EdgeSizes {
        let [top, right, bottom, left] = PADDINGS.map(|p| {
            self.length(p, LengthKind::Padding, Some(containing_width))
                .to_px_or(0.0)
        });
        EdgeSizes {
            top,
            right,
            bottom,
            left,
        }
    }

    /// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    ///
    /// [§ 4.3 Border Width](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    /// "Computed value: absolute length, snapped as a border width; zero if
    /// the border style is none or hidden"
    pub(crate) fn border(&self) -> EdgeSizes {
        let widths = BORDER_WIDTHS.map(|p| self.length(p, LengthKind::BorderWidth, None));
        let styles = BORDER_STYLES.map(|p| {
            self.node
                .is_some_and(|n| n.border_style(p, self.diag).draws_border())
        });
        let side = |i: usize| if styles[i] { widths[i].to_px_or(0.0) } else { 0.0 };
        EdgeSizes {
            top: side(0),
            right: side(1),
            bottom: side(2),
            left: side(3),
        }
    }

    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    ///
    /// Margins with `auto` resolved to 0, for boxes where `auto` has no
    /// special meaning (inline boxes, vertical margins).
    pub(crate) fn margin_px(&self, containing_width: f32) -> EdgeSizes {
        let margin = self.margin(containing_width);
        EdgeSizes {
            top: margin.top.to_px_or(0.0),
            right: margin.right.to_px_or(0.0),
            bottom: margin.bottom.to_px_or(0.0),
            left: margin.left.to_px_or(0.0),
        }
    }
}
