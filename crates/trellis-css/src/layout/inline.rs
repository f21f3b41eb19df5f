//! CSS Inline Layout and Line Box Model.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block. Horizontal
//! margins, borders, and padding are respected between these boxes."
//!
//! [§ 10.8 Line height calculations: the 'line-height' and 'vertical-align' properties](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "The height of the line box is determined by the rules given in the
//! section on line height calculations."
//!
//! Boxes on a line are top-aligned; the line is as tall as its tallest item.

use serde::Serialize;
use trellis_common::{Diagnostics, Warning};

use crate::style::{DEFAULT_FONT_SIZE_PX, FontStyle, FontWeight, StyledNode};

use super::box_model::Rect;

/// The font a run of text is set in, as the styled tree describes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescription {
    /// [§ 3.1](https://www.w3.org/TR/css-fonts-4/#font-family-prop) family
    /// names in preference order; empty means the engine default.
    pub families: Vec<String>,
    /// Computed font size in pixels.
    pub size: f32,
    /// Numeric font weight.
    pub weight: FontWeight,
    /// Normal, italic or oblique.
    pub style: FontStyle,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            families: Vec::new(),
            size: DEFAULT_FONT_SIZE_PX,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }
}

impl FontDescription {
    /// The font of `node`, or the default font for anonymous content.
    #[must_use]
    pub fn of(node: Option<StyledNode<'_>>, diag: &Diagnostics) -> Self {
        node.map_or_else(Self::default, |n| Self {
            families: n.font_family(diag),
            size: n.font_size(diag),
            weight: n.font_weight(diag),
            style: n.font_style(diag),
        })
    }
}

/// The measured extent of a run of text on one line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextMetrics {
    /// Sum of the advance widths of the run.
    pub width: f32,
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    /// The used line height for the font.
    pub line_height: f32,
}

/// Font metrics interface for text measurement during layout.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Implementors provide the actual per-glyph advance widths and line
/// height values needed for inline layout. Returning `None` means no font
/// matched the description; layout then falls back to
/// [`ApproximateFontMetrics`] and records a warning.
pub trait FontMetrics {
    /// Measure a single-line run of text.
    fn measure(&self, text: &str, font: &FontDescription) -> Option<TextMetrics>;
}

/// Approximate font metrics using fixed ratios.
///
/// Without access to actual font data, every character advances by half the
/// font size and a line is exactly one font size tall, which keeps geometry
/// easy to predict (a 10px font sets `"hello"` 25px wide and 10px tall).
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.5;
    const LINE_HEIGHT_RATIO: f32 = 1.0;
}

impl FontMetrics for ApproximateFontMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font: &FontDescription) -> Option<TextMetrics> {
        Some(TextMetrics {
            width: text.chars().count() as f32 * font.size * Self::CHAR_WIDTH_RATIO,
            line_height: font.size * Self::LINE_HEIGHT_RATIO,
        })
    }
}

/// A metrics source with no fonts at all. Every measurement falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFontMetrics;

impl FontMetrics for NoFontMetrics {
    fn measure(&self, _text: &str, _font: &FontDescription) -> Option<TextMetrics> {
        None
    }
}

/// The caller's metrics with the approximate fallback behind them.
#[derive(Clone, Copy)]
pub(crate) struct Measurer<'m> {
    metrics: &'m dyn FontMetrics,
    diag: &'m Diagnostics,
}

impl<'m> Measurer<'m> {
    pub(crate) fn new(metrics: &'m dyn FontMetrics, diag: &'m Diagnostics) -> Self {
        Self { metrics, diag }
    }

    pub(crate) fn measure(&self, text: &str, font: &FontDescription) -> TextMetrics {
        self.metrics.measure(text, font).unwrap_or_else(|| {
            self.diag.warn(Warning::MissingFont {
                families: if font.families.is_empty() {
                    "<default>".to_string()
                } else {
                    font.families.join(", ")
                },
            });
            ApproximateFontMetrics
                .measure(text, font)
                .unwrap_or(TextMetrics {
                    width: 0.0,
                    line_height: font.size,
                })
        })
    }

    pub(crate) fn width(&self, text: &str, font: &FontDescription) -> f32 {
        self.measure(text, font).width
    }
}

/// How a text run may be broken, from its `white-space` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextWrap {
    /// Soft wrap opportunities may be used.
    pub wraps: bool,
    /// Spaces at a soft break are removed.
    pub trims: bool,
}

/// One placed line fragment of a text run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextFragment {
    pub text: String,
    pub bounds: Rect,
}

/// Inline formatting context that manages line box construction.
///
/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "In an inline formatting context, boxes are laid out horizontally, one
/// after the other, beginning at the top of a containing block."
///
/// Positions are absolute: the pen starts at `line_left`, and lines end at
/// `line_right()` unless an open inline box with an explicit width narrows
/// them (see [`InlineLayout::push_width_limit`]).
#[derive(Debug, Clone)]
pub struct InlineLayout {
    /// Left edge of every line box.
    pub line_left: f32,
    /// Current X position on the current line.
    pub current_x: f32,
    /// Current line's Y position (top of line box).
    pub current_y: f32,
    /// Maximum width available for line boxes.
    pub available_width: f32,
    /// Maximum height seen on the current line (for line box height).
    pub current_line_max_height: f32,
    /// Whether anything has been placed on the current line.
    line_has_content: bool,
    /// Number of line boxes started so far, counting from 0.
    line_index: usize,
    /// Widths of the open inline boxes that specify one.
    width_limits: Vec<WidthLimit>,
}

/// An inline box's `width`, measured from where the box starts on its first
/// line and from `line_left` on every line after that.
#[derive(Debug, Clone, Copy)]
struct WidthLimit {
    line_index: usize,
    start_x: f32,
    width: f32,
}

impl InlineLayout {
    /// Create a new inline layout context.
    #[must_use]
    pub const fn new(line_left: f32, start_y: f32, available_width: f32) -> Self {
        Self {
            line_left,
            current_x: line_left,
            current_y: start_y,
            available_width,
            current_line_max_height: 0.0,
            line_has_content: false,
            line_index: 0,
            width_limits: Vec::new(),
        }
    }

    /// The right edge of line boxes in this context.
    #[must_use]
    pub fn line_right(&self) -> f32 {
        self.line_left + self.available_width
    }

    /// Where the current line ends: the line box's right edge, or less
    /// inside an inline box with an explicit width.
    #[must_use]
    pub fn right_limit(&self) -> f32 {
        self.width_limits
            .iter()
            .map(|limit| {
                let origin = if limit.line_index == self.line_index {
                    limit.start_x
                } else {
                    self.line_left
                };
                origin + limit.width
            })
            .fold(self.line_right(), f32::min)
    }

    /// Open an inline box that is `width` wide, starting at the pen.
    pub fn push_width_limit(&mut self, width: f32) {
        self.width_limits.push(WidthLimit {
            line_index: self.line_index,
            start_x: self.current_x,
            width,
        });
    }

    /// Close the innermost inline box opened by [`Self::push_width_limit`].
    pub fn pop_width_limit(&mut self) {
        let _ = self.width_limits.pop();
    }

    /// Returns true if nothing has been placed on the current line.
    #[must_use]
    pub const fn line_is_empty(&self) -> bool {
        !self.line_has_content
    }

    /// Move the pen without placing anything (inline box edges).
    pub fn advance(&mut self, dx: f32) {
        self.current_x += dx;
    }

    /// Place an atomic item of the given size at the pen, wrapping first if
    /// it does not fit on the line and the line already has content.
    pub fn place(&mut self, width: f32, height: f32) -> Rect {
        if self.line_has_content && self.current_x + width > self.right_limit() {
            self.finish_line();
        }
        self.place_here(width, height)
    }

    fn place_here(&mut self, width: f32, height: f32) -> Rect {
        let bounds = Rect::new(self.current_x, self.current_y, width, height);
        self.current_x += width;
        self.current_line_max_height = self.current_line_max_height.max(height);
        self.line_has_content = true;
        bounds
    }

    /// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
    ///
    /// Finalize the current line box and start a new one.
    ///
    /// "The height of the line box is the distance between the uppermost box
    /// top and the lowermost box bottom."
    pub fn finish_line(&mut self) {
        if self.line_has_content {
            self.current_y += self.current_line_max_height;
        }
        self.current_x = self.line_left;
        self.current_line_max_height = 0.0;
        self.line_has_content = false;
        self.line_index += 1;
    }

    /// [§ 9.2.1.1](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// Close the current line and step past a block-level box of the given
    /// margin-box height laid out in the middle of the inline content.
    pub fn skip_block(&mut self, height: f32) {
        self.finish_line();
        self.current_y += height;
    }

    /// [§ 4.1.2 Segment Breaks](https://www.w3.org/TR/css-text-3/#line-break-transform)
    ///
    /// A forced break. An otherwise empty line still takes `line_height`, so
    /// consecutive breaks leave blank lines.
    pub fn force_break(&mut self, line_height: f32) {
        if self.line_has_content {
            self.current_line_max_height = self.current_line_max_height.max(line_height);
        } else {
            self.current_y += line_height;
        }
        self.finish_line();
    }

    /// [§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// Add a text run to the inline formatting context, returning the
    /// fragments it was split into, one per line.
    ///
    /// "When an inline box exceeds the width of a line box, it is split into
    /// several boxes and these boxes are distributed across several line boxes."
    pub(crate) fn add_text(
        &mut self,
        text: &str,
        wrap: TextWrap,
        font: &FontDescription,
        measurer: &Measurer<'_>,
        out: &mut Vec<TextFragment>,
    ) {
        // STEP 1: Measure the text width.
        let metrics = measurer.measure(text, font);
        let right_limit = self.right_limit();

        // STEP 2: Check if text fits on the current line. Trailing
        // collapsible spaces are removed if the line ends after them, so
        // they do not count.
        let fits = |width: f32| self.current_x + width <= right_limit;
        if !wrap.wraps
            || fits(metrics.width)
            || (wrap.trims && fits(measurer.width(text.trim_end(), font)))
        {
            self.place_fragment(text, metrics.width, metrics.line_height, out);
            return;
        }

        // STEP 3: Handle line breaking.
        // [§ 5.5.2 Word Breaking Rules](https://www.w3.org/TR/css-text-3/#word-breaking)
        //
        // Try to find a soft wrap opportunity that fits on the current line.
        let remaining_width = right_limit - self.current_x;
        let break_idx =
            Self::find_break_opportunity(text, remaining_width, wrap.trims, font, measurer)
                .or_else(|| {
                    // No opportunity fits. On a non-empty line, retry on a
                    // fresh one; on an empty line, the first word overflows.
                    if self.line_has_content {
                        None
                    } else {
                        Self::first_break_opportunity(text)
                    }
                });

        let Some(break_idx) = break_idx else {
            if self.line_has_content {
                self.finish_line();
                let rest = if wrap.trims { text.trim_start() } else { text };
                if !rest.is_empty() {
                    self.add_text(rest, wrap, font, measurer, out);
                }
            } else {
                self.place_fragment(text, metrics.width, metrics.line_height, out);
            }
            return;
        };

        let (first, rest) = text.split_at(break_idx);

        // [§ 4.1.3](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
        // "A sequence of collapsible spaces at the end of a line is removed."
        let first = if wrap.trims { first.trim_end() } else { first };
        if !first.is_empty() {
            let width = measurer.width(first, font);
            self.place_fragment(first, width, metrics.line_height, out);
        }

        // Finalize this line and start a new one.
        self.finish_line();

        // "A sequence of collapsible spaces at the beginning of a line is removed."
        let rest = if wrap.trims { rest.trim_start() } else { rest };
        if !rest.is_empty() {
            self.add_text(rest, wrap, font, measurer, out);
        }
    }

    fn place_fragment(
        &mut self,
        text: &str,
        width: f32,
        line_height: f32,
        out: &mut Vec<TextFragment>,
    ) {
        let bounds = self.place_here(width, line_height);
        out.push(TextFragment {
            text: text.to_string(),
            bounds,
        });
    }

    /// [§ 5.5 Line Breaking and Word Boundaries](https://www.w3.org/TR/css-text-3/#line-breaking)
    ///
    /// Find the last soft wrap opportunity in a text string that fits
    /// within the given width.
    ///
    /// "A soft wrap opportunity is a position in the text where the
    /// UA may choose to break."
    ///
    /// The returned byte offset is the start of the word after the break;
    /// the prefix measures at most `max_width`. When `trims` is set the
    /// prefix is measured without its trailing whitespace, which the break
    /// removes.
    pub(crate) fn find_break_opportunity(
        text: &str,
        max_width: f32,
        trims: bool,
        font: &FontDescription,
        measurer: &Measurer<'_>,
    ) -> Option<usize> {
        // STEP 1: Walk through the string tracking byte offsets. A break
        // opportunity exists at the transition from whitespace to
        // non-whitespace (i.e., the start of a new word).
        let mut last_fitting_break: Option<usize> = None;
        let mut prev_was_whitespace = false;
        for (byte_idx, ch) in text.char_indices() {
            let is_whitespace = ch == ' ' || ch == '\t';
            if !is_whitespace && prev_was_whitespace {
                // STEP 2: Keep the last opportunity that fits.
                let prefix = &text[..byte_idx];
                let prefix = if trims { prefix.trim_end() } else { prefix };
                if measurer.width(prefix, font) <= max_width {
                    last_fitting_break = Some(byte_idx);
                } else {
                    break;
                }
            }
            prev_was_whitespace = is_whitespace;
        }
        last_fitting_break
    }

    /// The first soft wrap opportunity, regardless of width.
    fn first_break_opportunity(text: &str) -> Option<usize> {
        let mut prev_was_whitespace = false;
        for (byte_idx, ch) in text.char_indices() {
            let is_whitespace = ch == ' ' || ch == '\t';
            if !is_whitespace && prev_was_whitespace {
                return Some(byte_idx);
            }
            prev_was_whitespace = is_whitespace;
        }
        None
    }

    /// The Y coordinate below the last line, including an unfinished one.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        if self.line_has_content {
            self.current_y + self.current_line_max_height
        } else {
            self.current_y
        }
    }
}
