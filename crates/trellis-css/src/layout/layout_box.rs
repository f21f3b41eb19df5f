//! Layout box types and layout algorithms.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

use serde::Serialize;
use trellis_common::Diagnostics;
use trellis_dom::NodeType;

use crate::style::{Display, StyledNode, WhiteSpace};

use super::box_model::{BoxDimensions, Rect};
use super::inline::{FontDescription, InlineLayout, Measurer, TextWrap};
use super::replaced::{ReplacedContent, ReplacedSizing};
use super::text::process_inline_content;
use super::values::{BoxStyle, ResolvedLength};

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Everything a layout pass reads besides the box tree itself.
pub(crate) struct LayoutContext<'c> {
    pub(crate) measurer: Measurer<'c>,
    pub(crate) sizing: &'c dyn ReplacedSizing,
    pub(crate) diag: &'c Diagnostics,
}

/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// "The position and size of an element's box(es) are sometimes calculated
/// relative to a certain rectangle, called the containing block of the
/// element."
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContainingBlock {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    /// `None` while the height depends on the content.
    pub(crate) height: Option<f32>,
}

impl ContainingBlock {
    /// [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "The containing block in which the root element lives is a rectangle
    /// called the initial containing block."
    pub(crate) const fn initial(width: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height: None,
        }
    }
}

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// The kind of box, which decides the layout algorithm that positions it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BoxType {
    /// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
    ///
    /// "A block container box either contains only block-level boxes or
    /// establishes an inline formatting context and thus contains only
    /// inline-level boxes."
    Block,
    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    Inline,
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// Wraps a run of inline-level boxes inside a block container. Has no
    /// styled node.
    AnonymousBlock,
    /// [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
    ///
    /// A run of text. Before layout this holds the node's whole text; after
    /// layout each box is one line fragment.
    Text(String),
    /// A forced line break (`<br>`).
    LineBreak,
    /// [§ 3.1 Replaced elements](https://www.w3.org/TR/CSS2/conform.html#replaced-element)
    Replaced {
        /// Whether the element is inline-level.
        inline: bool,
        /// What the element shows.
        content: ReplacedContent,
    },
}

impl BoxType {
    /// Returns true for boxes that participate in a block formatting context.
    #[must_use]
    pub const fn is_block_level(&self) -> bool {
        matches!(
            self,
            Self::Block | Self::AnonymousBlock | Self::Replaced { inline: false, .. }
        )
    }
}

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// A box in the layout tree with its computed dimensions.
///
/// After layout all coordinates are absolute, in pixels, relative to the
/// initial containing block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox<'a> {
    /// The styled node that generated this box; `None` for anonymous boxes.
    pub node: Option<StyledNode<'a>>,
    /// What kind of box this is.
    pub box_type: BoxType,
    /// [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)
    pub dimensions: BoxDimensions,
    /// Child boxes in document order.
    pub children: Vec<LayoutBox<'a>>,
}

impl<'a> LayoutBox<'a> {
    fn new(node: Option<StyledNode<'a>>, box_type: BoxType) -> Self {
        Self {
            node,
            box_type,
            dimensions: BoxDimensions::default(),
            children: Vec::new(),
        }
    }

    /// The text of a line fragment, or the alt text of a replaced box.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.box_type {
            BoxType::Text(text)
            | BoxType::Replaced {
                content: ReplacedContent::Alt(text),
                ..
            } => Some(text),
            _ => None,
        }
    }

    /// Returns true if no styled node generated this box.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self.box_type, BoxType::AnonymousBlock)
    }

    /// All boxes of this subtree in pre-order, starting with `self`.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// The deepest box whose border box contains the point. Later siblings
    /// win over earlier ones.
    #[must_use]
    pub fn box_at(&self, x: f32, y: f32) -> Option<&Self> {
        self.children
            .iter()
            .rev()
            .find_map(|child| child.box_at(x, y))
            .or_else(|| self.dimensions.border_box().contains(x, y).then_some(self))
    }

    // ── Box generation ─────────────────────────────────────────────────

    /// Build the box tree for `node`, with whitespace processed.
    pub(crate) fn build_root(node: StyledNode<'a>, cx: &LayoutContext<'_>) -> Option<Self> {
        let root = Self::build_layout_tree(node, cx)?;
        if root.box_type.is_block_level() {
            return Some(root);
        }
        // An inline-level root is its own inline formatting context.
        let mut boxes = vec![root];
        process_inline_content(&mut boxes, cx.diag);
        boxes.pop()
    }

    /// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
    ///
    /// "An element's display type determines the type of principal box
    /// it generates."
    pub(crate) fn build_layout_tree(node: StyledNode<'a>, cx: &LayoutContext<'_>) -> Option<Self> {
        match node.node_type()? {
            // [§ 9.1.1 The viewport](https://www.w3.org/TR/CSS2/visuren.html#viewport)
            //
            // The Document node establishes the root of the layout tree.
            NodeType::Document => Some(Self::with_children(node, BoxType::Block, cx)),
            NodeType::Text(text) => Some(Self::new(Some(node), BoxType::Text(text.clone()))),
            NodeType::Comment(_) => None,
            NodeType::Element(element) => {
                let display = node.display(cx.diag);

                // [§ 2.6 display: none](https://www.w3.org/TR/css-display-3/#valdef-display-none)
                //
                // "The element and its descendants generate no boxes or text runs."
                if display == Display::None {
                    return None;
                }

                if element.is("br") {
                    return Some(Self::new(Some(node), BoxType::LineBreak));
                }

                if ReplacedContent::is_replaced(element) {
                    let content = ReplacedContent::for_element(element, cx.sizing);
                    return Some(Self::new(
                        Some(node),
                        BoxType::Replaced {
                            inline: !display.is_block(),
                            content,
                        },
                    ));
                }

                let box_type = if display.is_block() {
                    BoxType::Block
                } else {
                    BoxType::Inline
                };
                Some(Self::with_children(node, box_type, cx))
            }
        }
    }

    fn with_children(node: StyledNode<'a>, box_type: BoxType, cx: &LayoutContext<'_>) -> Self {
        let mut layout_box = Self::new(Some(node), box_type);
        layout_box.children = node
            .children()
            .filter_map(|child| Self::build_layout_tree(child, cx))
            .collect();
        if layout_box.box_type == BoxType::Block {
            layout_box.generate_anonymous_boxes(cx.diag);
        }
        layout_box
    }

    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "If a block container box (such as that generated for the DIV above)
    /// has a block-level box inside it (such as the P above), then we force
    /// it to have only block-level boxes inside it."
    ///
    /// Every run of inline-level children is wrapped, so a block container's
    /// children are always block-level and each anonymous block is exactly
    /// one inline formatting context. Runs that hold nothing after
    /// whitespace processing are dropped.
    fn generate_anonymous_boxes(&mut self, diag: &Diagnostics) {
        let mut new_children: Vec<Self> = Vec::new();
        let mut inline_run: Vec<Self> = Vec::new();

        let flush = |run: &mut Vec<Self>, out: &mut Vec<Self>| {
            if run.is_empty() {
                return;
            }
            let mut anonymous = Self::wrap_in_anonymous_block(std::mem::take(run));
            process_inline_content(&mut anonymous.children, diag);
            if !anonymous.children.is_empty() {
                out.push(anonymous);
            }
        };

        for child in std::mem::take(&mut self.children) {
            if child.box_type.is_block_level() {
                flush(&mut inline_run, &mut new_children);
                new_children.push(child);
            } else {
                inline_run.push(child);
            }
        }
        flush(&mut inline_run, &mut new_children);

        self.children = new_children;
    }

    fn wrap_in_anonymous_block(children: Vec<Self>) -> Self {
        Self {
            children,
            ..Self::new(None, BoxType::AnonymousBlock)
        }
    }

    // ── Layout ─────────────────────────────────────────────────────────

    /// Lay out this box and its subtree inside `containing_block`.
    pub(crate) fn layout(&mut self, containing_block: ContainingBlock, cx: &LayoutContext<'_>) {
        #[cfg(feature = "layout-trace")]
        let _depth = {
            let depth = LAYOUT_DEPTH.with(|d| {
                let current = d.get();
                d.set(current + 1);
                current
            });
            eprintln!(
                "[LAYOUT DEPTH] depth={depth} box={:?} children={} cb={containing_block:?}",
                self.box_type,
                self.children.len()
            );
            // Guard struct decrements depth counter on all return paths.
            struct DepthGuard;
            impl Drop for DepthGuard {
                fn drop(&mut self) {
                    LAYOUT_DEPTH.with(|d| d.set(d.get() - 1));
                }
            }
            DepthGuard
        };

        if self.box_type.is_block_level() {
            self.layout_block(containing_block, cx);
        } else {
            self.layout_inline_root(containing_block, cx);
        }
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// Layout algorithm for block-level boxes in normal flow.
    fn layout_block(&mut self, containing_block: ContainingBlock, cx: &LayoutContext<'_>) {
        let style = BoxStyle::new(self.node, cx.diag);
        let cb_width = containing_block.width;

        // STEP 1: Calculate width, margins, borders and padding.
        let width = self.specified_width(&style, containing_block);
        self.calculate_block_width(&style, cb_width, width);
        self.apply_min_max_width(&style, cb_width);

        // STEP 2: Calculate position (x, y) and the vertical edges.
        self.calculate_block_position(&style, containing_block);

        // STEP 3: Resolve the specified height. When it is known before the
        // children are laid out it is also their containing block height.
        // [§ 10.5](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
        let explicit_height = style.height(containing_block.height);
        let min_height = style.min_height(containing_block.height);
        let max_height = style.max_height(containing_block.height);
        let definite_height = match explicit_height {
            ResolvedLength::Px(h) => Some(h.min(max_height).max(min_height)),
            ResolvedLength::Auto | ResolvedLength::Unbounded => None,
        };

        // STEP 4: Layout children.
        let content_height = match self.box_type {
            BoxType::AnonymousBlock => self.layout_inline_children(cx),
            BoxType::Replaced { .. } => self.replaced_content_height(cx),
            _ => self.layout_block_children(definite_height, cx),
        };

        // STEP 5: Calculate height.
        // [§ 10.6.3 Block-level non-replaced elements in normal flow when
        // 'overflow' computes to 'visible'](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
        //
        // "If 'height' is 'auto', the height depends on whether the element
        // has any block-level children..."
        self.dimensions.content.height = explicit_height.to_px_or(content_height);

        // STEP 6: Apply min-height and max-height constraints.
        self.apply_min_max_height(min_height, max_height);
    }

    /// The `width` that enters the width equation. Replaced boxes with an
    /// `auto` width use their intrinsic width.
    ///
    /// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
    ///
    /// "if 'width' has a computed value of 'auto', and the element has an
    /// intrinsic width, then that intrinsic width is the used value of
    /// 'width'."
    fn specified_width(&self, style: &BoxStyle<'_, '_>, cb: ContainingBlock) -> ResolvedLength {
        let width = style.width(cb.width);
        if !width.is_auto() {
            return width;
        }
        match &self.box_type {
            BoxType::Replaced {
                content: ReplacedContent::Sized(size),
                ..
            } => match style.height(cb.height) {
                // "or if 'width' has a computed value of 'auto', 'height' has
                // some other computed value, and the element does have an
                // intrinsic ratio; then the used value of 'width' is:
                // (used height) * (intrinsic ratio)"
                ResolvedLength::Px(h) if size.height > 0.0 => {
                    ResolvedLength::Px(h * size.width / size.height)
                }
                _ => ResolvedLength::Px(size.width),
            },
            _ => width,
        }
    }

    /// [§ 10.6.2 Inline replaced elements, block-level replaced elements in
    /// normal flow](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
    ///
    /// The content height of a replaced box whose `height` is `auto`: the
    /// intrinsic height scaled with the used width, or one line of alt text.
    fn replaced_content_height(&self, cx: &LayoutContext<'_>) -> f32 {
        let BoxType::Replaced { content, .. } = &self.box_type else {
            return 0.0;
        };
        match content {
            // "Otherwise, if 'height' has a computed value of 'auto', and the
            // element has an intrinsic ratio then the used value of 'height'
            // is: (used width) / (intrinsic ratio)"
            ReplacedContent::Sized(size) if size.width > 0.0 => {
                self.dimensions.content.width * size.height / size.width
            }
            ReplacedContent::Sized(size) => size.height,
            ReplacedContent::Alt(text) => {
                let font = FontDescription::of(self.node, cx.diag);
                cx.measurer.measure(text, &font).line_height
            }
            ReplacedContent::Empty => 0.0,
        }
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// Calculate the used width and horizontal margins.
    ///
    /// `width` is the value to treat as the computed `width`; the min/max
    /// pass re-runs this with the limits substituted.
    pub(crate) fn calculate_block_width(
        &mut self,
        style: &BoxStyle<'_, '_>,
        containing_width: f32,
        width: ResolvedLength,
    ) {
        // [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
        //
        // "The following constraints must hold among the used values of the
        // other properties:
        //
        //   'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
        //   'padding-right' + 'border-right-width' + 'margin-right'
        //   = width of containing block"

        // STEP 1: Resolve the edges. Border and padding cannot be 'auto',
        // only margins and width can.
        let padding = style.padding(containing_width);
        let border = style.border();
        let margin = style.margin(containing_width);
        let mut margin_left = margin.left;
        let mut margin_right = margin.right;
        let edges = border.left + padding.left + padding.right + border.right;

        // STEP 2: Handle over-constrained case
        //
        // "If 'width' is not 'auto' and 'border-left-width' + 'padding-left' +
        // 'width' + 'padding-right' + 'border-right-width' (plus any of
        // 'margin-left' or 'margin-right' that are not 'auto') is larger than
        // the width of the containing block, then any 'auto' values for
        // 'margin-left' or 'margin-right' are, for the following rules,
        // treated as zero."
        if !width.is_auto() {
            let total = edges
                + width.to_px_or(0.0)
                + margin_left.to_px_or(0.0)
                + margin_right.to_px_or(0.0);
            if total > containing_width {
                if margin_left.is_auto() {
                    margin_left = ResolvedLength::Px(0.0);
                }
                if margin_right.is_auto() {
                    margin_right = ResolvedLength::Px(0.0);
                }
            }
        }

        // STEP 3: Apply the constraint rules to calculate used values.
        let used_width: f32;
        let used_margin_left: f32;
        let used_margin_right: f32;

        // RULE A: "If 'width' is set to 'auto', any other 'auto' values become
        //         '0' and 'width' follows from the resulting equality."
        if width.is_auto() {
            used_margin_left = margin_left.to_px_or(0.0);
            used_margin_right = margin_right.to_px_or(0.0);
            used_width = (containing_width - used_margin_left - used_margin_right - edges).max(0.0);
        }
        // RULE B: "If both 'margin-left' and 'margin-right' are 'auto', their
        //         used values are equal."
        else if margin_left.is_auto() && margin_right.is_auto() {
            used_width = width.to_px_or(0.0);
            let remaining = containing_width - used_width - edges;
            used_margin_left = remaining / 2.0;
            used_margin_right = remaining / 2.0;
        }
        // RULE C: "If there is exactly one value specified as 'auto', its used
        //         value follows from the equality."
        else if margin_left.is_auto() {
            used_width = width.to_px_or(0.0);
            used_margin_right = margin_right.to_px_or(0.0);
            used_margin_left = containing_width - used_width - used_margin_right - edges;
        } else if margin_right.is_auto() {
            used_width = width.to_px_or(0.0);
            used_margin_left = margin_left.to_px_or(0.0);
            used_margin_right = containing_width - used_width - used_margin_left - edges;
        }
        // Over-constrained: the specified margins are kept as they are and
        // the box overflows (or underfills) its containing block.
        else {
            used_width = width.to_px_or(0.0);
            used_margin_left = margin_left.to_px_or(0.0);
            used_margin_right = margin_right.to_px_or(0.0);
        }

        // STEP 4: Store the used values.
        self.dimensions.content.width = used_width;
        self.dimensions.margin.left = used_margin_left;
        self.dimensions.margin.right = used_margin_right;
        self.dimensions.padding = padding;
        self.dimensions.border = border;
    }

    /// [§ 10.4 Minimum and maximum widths: 'min-width' and 'max-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    fn apply_min_max_width(&mut self, style: &BoxStyle<'_, '_>, containing_width: f32) {
        // STEP 1: Apply max-width constraint.
        //
        // "If the tentative used width is greater than 'max-width', the rules
        // above are applied again, but this time using the computed value of
        // 'max-width' as the computed value for 'width'."
        let max_width = style.max_width(containing_width);
        if self.dimensions.content.width > max_width {
            self.calculate_block_width(style, containing_width, ResolvedLength::Px(max_width));
        }

        // STEP 2: Apply min-width constraint (min wins over max).
        //
        // "If the resulting width is smaller than 'min-width', the rules above
        // are applied again, but this time using the value of 'min-width' as
        // the computed value for 'width'."
        let min_width = style.min_width(containing_width);
        if self.dimensions.content.width < min_width {
            self.calculate_block_width(style, containing_width, ResolvedLength::Px(min_width));
        }
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// Calculate the position of a block-level box.
    ///
    /// "Each box's left outer edge touches the left edge of the containing block
    /// (for right-to-left formatting, right edges touch)."
    fn calculate_block_position(&mut self, style: &BoxStyle<'_, '_>, containing_block: ContainingBlock) {
        // STEP 1: Resolve the vertical margins. 'auto' is 0 for blocks in
        // normal flow.
        // [§ 10.6.3](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
        let margin = style.margin_px(containing_block.width);
        self.dimensions.margin.top = margin.top;
        self.dimensions.margin.bottom = margin.bottom;

        // STEP 2: The content box sits inside margin, border and padding.
        let d = &mut self.dimensions;
        d.content.x = containing_block.x + d.margin.left + d.border.left + d.padding.left;

        // "In a block formatting context, boxes are laid out one after the other,
        // vertically, beginning at the top of a containing block."
        //
        // The containing block's y already accounts for any siblings above.
        d.content.y = containing_block.y + d.margin.top + d.border.top + d.padding.top;
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// Layout children in a block formatting context, returning the height
    /// they take up. Margins do not collapse.
    fn layout_block_children(&mut self, definite_height: Option<f32>, cx: &LayoutContext<'_>) -> f32 {
        let content = self.dimensions.content;
        let mut cursor_y = content.y;
        for child in &mut self.children {
            child.layout(
                ContainingBlock {
                    x: content.x,
                    y: cursor_y,
                    width: content.width,
                    height: definite_height,
                },
                cx,
            );
            cursor_y += child.dimensions.margin_box().height;
        }
        cursor_y - content.y
    }

    /// [§ 10.7 Minimum and maximum heights: 'min-height' and 'max-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    fn apply_min_max_height(&mut self, min_height: f32, max_height: f32) {
        // STEP 1: Apply max-height constraint.
        if self.dimensions.content.height > max_height {
            self.dimensions.content.height = max_height;
        }

        // STEP 2: Apply min-height constraint (min wins over max).
        if self.dimensions.content.height < min_height {
            self.dimensions.content.height = min_height;
        }
    }

    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// Layout the children of an anonymous block as line boxes, returning
    /// the total height of the lines.
    fn layout_inline_children(&mut self, cx: &LayoutContext<'_>) -> f32 {
        let content = self.dimensions.content;
        let block = ContainingBlock {
            x: content.x,
            y: content.y,
            width: content.width,
            height: None,
        };
        let mut inline_layout = InlineLayout::new(content.x, content.y, content.width);
        let children = std::mem::take(&mut self.children);
        self.children = Self::layout_inline_content(children, &mut inline_layout, block, cx);
        Self::trim_soft_wrap_ends(&mut self.children, cx);
        inline_layout.finish_line();
        inline_layout.current_y - content.y
    }

    /// An inline-level box at the root of the tree shrinks to its content.
    fn layout_inline_root(&mut self, containing_block: ContainingBlock, cx: &LayoutContext<'_>) {
        let mut inline_layout =
            InlineLayout::new(containing_block.x, containing_block.y, containing_block.width);
        let node = self.node;
        let root = std::mem::replace(self, Self::new(node, BoxType::LineBreak));
        let mut placed =
            Self::layout_inline_content(vec![root], &mut inline_layout, containing_block, cx);
        Self::trim_soft_wrap_ends(&mut placed, cx);
        inline_layout.finish_line();

        if placed.len() == 1 {
            if let Some(root) = placed.pop() {
                *self = root;
            }
        } else {
            // A text root broken over several lines (or trimmed away) becomes
            // an inline box holding its fragments, so it carries no text of
            // its own.
            self.box_type = BoxType::Inline;
            self.dimensions.content = Self::union_of(&placed).unwrap_or(Rect::new(
                containing_block.x,
                containing_block.y,
                0.0,
                0.0,
            ));
            self.children = placed;
        }
    }

    /// [§ 4.1.3](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
    ///
    /// "A sequence of collapsible spaces at the end of a line is removed."
    ///
    /// A text fragment is at the end of a line when the next item of the
    /// inline formatting context starts further down, or there is none.
    /// Fragments trimmed to nothing are dropped and inline boxes are refitted
    /// around what remains.
    fn trim_soft_wrap_ends(boxes: &mut Vec<Self>, cx: &LayoutContext<'_>) {
        let mut tops = Vec::new();
        Self::collect_item_tops(boxes, &mut tops);
        let mut index = 0;
        Self::trim_fragments(boxes, &tops, &mut index, cx);
    }

    /// The top edge of every item placed on a line, in order.
    fn collect_item_tops(boxes: &[Self], tops: &mut Vec<f32>) {
        for b in boxes {
            if b.box_type == BoxType::Inline {
                Self::collect_item_tops(&b.children, tops);
            } else {
                tops.push(b.dimensions.margin_box().y);
            }
        }
    }

    fn trim_fragments(
        boxes: &mut Vec<Self>,
        tops: &[f32],
        index: &mut usize,
        cx: &LayoutContext<'_>,
    ) {
        for b in boxes.iter_mut() {
            if b.box_type == BoxType::Inline {
                Self::trim_fragments(&mut b.children, tops, index, cx);
                if let Some(content) = Self::union_of(&b.children) {
                    b.dimensions.content = content;
                }
                continue;
            }

            let top = b.dimensions.margin_box().y;
            *index += 1;
            let ends_line = tops.get(*index).is_none_or(|next| *next > top);
            let BoxType::Text(text) = &b.box_type else {
                continue;
            };
            let collapses = b
                .node
                .is_none_or(|n| n.white_space(cx.diag).collapses_spaces());
            let trimmed = text.trim_end();
            if !ends_line || !collapses || trimmed.len() == text.len() {
                continue;
            }

            let trimmed = trimmed.to_string();
            b.dimensions.content.width = cx
                .measurer
                .width(&trimmed, &FontDescription::of(b.node, cx.diag));
            b.box_type = BoxType::Text(trimmed);
        }
        boxes.retain(|b| !matches!(&b.box_type, BoxType::Text(text) if text.is_empty()));
    }

    fn union_of(boxes: &[Self]) -> Option<Rect> {
        boxes
            .iter()
            .map(|b| b.dimensions.margin_box())
            .reduce(|a, b| a.union(&b))
    }

    /// [§ 9.2.2](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    ///
    /// Place a sequence of inline-level boxes into the inline formatting
    /// context, returning them positioned. Text boxes come back as one box
    /// per line fragment.
    ///
    /// "An inline box is one that is both inline-level and whose contents
    /// participate in its containing inline formatting context."
    fn layout_inline_content(
        children: Vec<Self>,
        inline_layout: &mut InlineLayout,
        block: ContainingBlock,
        cx: &LayoutContext<'_>,
    ) -> Vec<Self> {
        let mut placed = Vec::with_capacity(children.len());

        for mut child in children {
            match &child.box_type {
                BoxType::Text(text) => {
                    // [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
                    //
                    // "Any text that is directly contained inside a block
                    // container element... must be treated as an anonymous
                    // inline element."
                    let font = FontDescription::of(child.node, cx.diag);
                    let mode = child
                        .node
                        .map_or(WhiteSpace::Normal, |n| n.white_space(cx.diag));
                    let wrap = TextWrap {
                        wraps: mode.wraps(),
                        trims: mode.collapses_spaces(),
                    };

                    let mut fragments = Vec::new();
                    if mode.preserves_newlines() {
                        // [§ 4.1.2](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
                        // Preserved segment breaks are forced line breaks.
                        let line_height = cx.measurer.measure("", &font).line_height;
                        for (i, segment) in text.split('\n').enumerate() {
                            if i > 0 {
                                inline_layout.force_break(line_height);
                            }
                            if !segment.is_empty() {
                                inline_layout.add_text(
                                    segment,
                                    wrap,
                                    &font,
                                    &cx.measurer,
                                    &mut fragments,
                                );
                            }
                        }
                    } else {
                        inline_layout.add_text(
                            text,
                            wrap,
                            &font,
                            &cx.measurer,
                            &mut fragments,
                        );
                    }

                    placed.extend(fragments.into_iter().map(|fragment| Self {
                        dimensions: BoxDimensions {
                            content: fragment.bounds,
                            ..BoxDimensions::default()
                        },
                        ..Self::new(child.node, BoxType::Text(fragment.text))
                    }));
                }
                BoxType::LineBreak => {
                    // [§ 9.2.2](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
                    // The break sits at the pen with no size and ends the line.
                    let font = FontDescription::of(child.node, cx.diag);
                    let line_height = cx.measurer.measure("", &font).line_height;
                    child.dimensions.content =
                        Rect::new(inline_layout.current_x, inline_layout.current_y, 0.0, 0.0);
                    inline_layout.force_break(line_height);
                    placed.push(child);
                }
                BoxType::Inline => {
                    // Non-replaced inline boxes do not form opaque fragments.
                    // Their left margin+border+padding is applied, then their
                    // children are recursively laid out in the same inline
                    // formatting context, then their right margin+border+padding
                    // is applied.

                    // STEP 1: Resolve the inline box's edge sizes.
                    // [§ 10.6.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-non-replaced)
                    //
                    // "The 'height' property does not apply." Vertical edges are
                    // recorded but do not move the line.
                    let style = BoxStyle::new(child.node, cx.diag);
                    let margin = style.margin_px(block.width);
                    let border = style.border();
                    let padding = style.padding(block.width);
                    child.dimensions.margin = margin;
                    child.dimensions.border = border;
                    child.dimensions.padding = padding;

                    // STEP 2: Open the inline box (apply left edge).
                    inline_layout.advance(margin.left + border.left + padding.left);
                    let start = Rect::new(inline_layout.current_x, inline_layout.current_y, 0.0, 0.0);

                    // "The 'width' property does not apply" to the box itself,
                    // but an explicit width still limits every line its text
                    // wraps onto.
                    let width_limit = match style.width(block.width) {
                        ResolvedLength::Px(w) => Some(w),
                        ResolvedLength::Auto | ResolvedLength::Unbounded => None,
                    };
                    if let Some(w) = width_limit {
                        inline_layout.push_width_limit(w);
                    }

                    // STEP 3: Recursively lay out the inline box's children.
                    let grandchildren = std::mem::take(&mut child.children);
                    child.children =
                        Self::layout_inline_content(grandchildren, inline_layout, block, cx);
                    if width_limit.is_some() {
                        inline_layout.pop_width_limit();
                    }

                    // STEP 4: Close the inline box (apply right edge).
                    inline_layout.advance(padding.right + border.right + margin.right);

                    // STEP 5: The content area covers everything placed inside.
                    child.dimensions.content = Self::union_of(&child.children).unwrap_or(start);
                    placed.push(child);
                }
                BoxType::Replaced { inline: true, .. } => {
                    // [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
                    //
                    // Replaced boxes are atomic: the margin box is placed on the
                    // line as a single unit.
                    child.layout_inline_replaced(inline_layout, block, cx);
                    placed.push(child);
                }
                BoxType::Block | BoxType::AnonymousBlock | BoxType::Replaced { inline: false, .. } => {
                    // [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
                    //
                    // "When an inline box contains an in-flow block-level box,
                    // the inline box (and its inline ancestors within the same
                    // line box) are broken around the block-level box"
                    //
                    // STEP 1: Flush any accumulated inline content into a line box.
                    inline_layout.finish_line();

                    // STEP 2: The block child is positioned at the full width
                    // of the block container, not narrowed by any inline box
                    // margin/border/padding.
                    child.layout(
                        ContainingBlock {
                            x: block.x,
                            y: inline_layout.current_y,
                            width: block.width,
                            height: None,
                        },
                        cx,
                    );

                    // STEP 3: Resume inline layout below it.
                    inline_layout.skip_block(child.dimensions.margin_box().height);
                    placed.push(child);
                }
            }
        }

        placed
    }

    fn layout_inline_replaced(
        &mut self,
        inline_layout: &mut InlineLayout,
        block: ContainingBlock,
        cx: &LayoutContext<'_>,
    ) {
        let style = BoxStyle::new(self.node, cx.diag);
        let margin = style.margin_px(block.width);
        let border = style.border();
        let padding = style.padding(block.width);

        // STEP 1: Used width: specified, intrinsic, or the alt text's width.
        let width = match self.specified_width(&style, block) {
            ResolvedLength::Px(w) => w,
            ResolvedLength::Auto | ResolvedLength::Unbounded => match &self.box_type {
                BoxType::Replaced {
                    content: ReplacedContent::Alt(text),
                    ..
                } => cx
                    .measurer
                    .width(text, &FontDescription::of(self.node, cx.diag)),
                _ => 0.0,
            },
        };
        let width = width
            .min(style.max_width(block.width))
            .max(style.min_width(block.width));
        self.dimensions.content.width = width;

        // STEP 2: Used height.
        let height = style
            .height(block.height)
            .to_px_or(self.replaced_content_height(cx))
            .min(style.max_height(block.height))
            .max(style.min_height(block.height));

        // STEP 3: Place the margin box on the line.
        let bounds = inline_layout.place(
            margin.horizontal() + border.horizontal() + padding.horizontal() + width,
            margin.vertical() + border.vertical() + padding.vertical() + height,
        );

        self.dimensions.margin = margin;
        self.dimensions.border = border;
        self.dimensions.padding = padding;
        self.dimensions.content = Rect::new(
            bounds.x + margin.left + border.left + padding.left,
            bounds.y + margin.top + border.top + padding.top,
            width,
            height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::inline::ApproximateFontMetrics;
    use crate::layout::replaced::NoReplacedSizing;
    use crate::style::StyledTree;
    use trellis_dom::{DomTree, ElementData};

    fn with_context<R>(f: impl FnOnce(&LayoutContext<'_>) -> R) -> R {
        let diag = Diagnostics::new();
        let cx = LayoutContext {
            measurer: Measurer::new(&ApproximateFontMetrics, &diag),
            sizing: &NoReplacedSizing,
            diag: &diag,
        };
        f(&cx)
    }

    #[test]
    fn test_block_container_wraps_every_inline_run() {
        let mut dom = DomTree::new();
        let div = dom.append_element(dom.root(), ElementData::new("div"));
        let _ = dom.append_text(div, "a");
        let p = dom.append_element(div, ElementData::new("p"));
        let _ = dom.append_text(div, "b");
        let mut tree = StyledTree::from_dom(&dom, div).unwrap();
        let p_id = tree.find(p).unwrap();
        tree.set_declaration(tree.root().id(), "display", "block").unwrap();
        tree.set_declaration(p_id, "display", "block").unwrap();

        let root = with_context(|cx| LayoutBox::build_root(tree.root(), cx)).unwrap();
        let kinds: Vec<_> = root.children.iter().map(|c| c.box_type.clone()).collect();
        assert_eq!(
            kinds,
            [BoxType::AnonymousBlock, BoxType::Block, BoxType::AnonymousBlock]
        );
    }

    #[test]
    fn test_whitespace_only_run_is_dropped() {
        let mut dom = DomTree::new();
        let div = dom.append_element(dom.root(), ElementData::new("div"));
        let p = dom.append_element(div, ElementData::new("p"));
        let _ = dom.append_text(div, "   ");
        let mut tree = StyledTree::from_dom(&dom, div).unwrap();
        let p_id = tree.find(p).unwrap();
        tree.set_declaration(tree.root().id(), "display", "block").unwrap();
        tree.set_declaration(p_id, "display", "block").unwrap();

        let root = with_context(|cx| LayoutBox::build_root(tree.root(), cx)).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].box_type, BoxType::Block);
    }

    #[test]
    fn test_iter_is_pre_order() {
        let leaf = |t: &str| LayoutBox::new(None, BoxType::Text(t.to_string()));
        let mut inner = LayoutBox::new(None, BoxType::AnonymousBlock);
        inner.children = vec![leaf("b"), leaf("c")];
        let mut root = LayoutBox::new(None, BoxType::AnonymousBlock);
        root.children = vec![leaf("a"), inner, leaf("d")];

        let texts: Vec<_> = root.iter().filter_map(LayoutBox::text).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_box_at_finds_deepest() {
        let mut child = LayoutBox::new(None, BoxType::Text("x".to_string()));
        child.dimensions.content = Rect::new(10.0, 10.0, 10.0, 10.0);
        let mut root = LayoutBox::new(None, BoxType::AnonymousBlock);
        root.dimensions.content = Rect::new(0.0, 0.0, 100.0, 100.0);
        root.children = vec![child];

        assert_eq!(root.box_at(15.0, 15.0).and_then(LayoutBox::text), Some("x"));
        assert!(root.box_at(50.0, 50.0).is_some_and(LayoutBox::is_anonymous));
        assert!(root.box_at(150.0, 50.0).is_none());
    }
}
