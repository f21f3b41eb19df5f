//! Integration tests for box generation and layout geometry.
//!
//! Unless a test says otherwise, text is measured with
//! [`ApproximateFontMetrics`]: every character is half the font size wide and
//! a line is one font size tall.

use trellis_common::Warning;
use trellis_css::{
    ApproximateFontMetrics, BoxType, LayoutBox, NoFontMetrics, NoReplacedSizing, Rect, Size,
    StyledTree, create_layout, create_layout_with, create_layout_with_diagnostics,
};
use trellis_dom::{DomTree, ElementData, NodeId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn element(dom: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    dom.append_element(parent, ElementData::new(tag))
}

/// A `<div>` under the document, to be used as the layout root.
fn root_div(dom: &mut DomTree) -> NodeId {
    let document = dom.root();
    element(dom, document, "div")
}

fn style(tree: &mut StyledTree<'_>, node: NodeId, declarations: &[(&str, &str)]) {
    let id = tree.find(node).expect("node should be in the styled tree");
    for (name, value) in declarations {
        tree.set_declaration(id, name, value)
            .expect("declaration should name a known property");
    }
}

fn content(layout_box: &LayoutBox<'_>) -> Rect {
    layout_box.dimensions.content
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y, width, height)
}

// ---------------------------------------------------------------------------
// Box generation
// ---------------------------------------------------------------------------

#[test]
fn test_display_none_root_generates_nothing() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "none")]);

    assert!(create_layout(&tree, 1000.0).is_none());
}

#[test]
fn test_display_none_child_is_pruned() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let hidden = element(&mut dom, div, "div");
    let _ = dom.append_text(hidden, "invisible");
    let shown = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(&mut tree, hidden, &[("display", "none")]);
    style(&mut tree, shown, &[("display", "block")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].node.map(|n| n.dom_node()), Some(shown));
}

#[test]
fn test_inline_nodes_get_wrapped() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);

    let root = create_layout(&tree, 0.0).unwrap();
    assert_eq!(root.children.len(), 1);
    let anonymous = &root.children[0];
    assert!(anonymous.is_anonymous());
    assert!(anonymous.node.is_none());
    assert_eq!(anonymous.children[0].node.map(|n| n.dom_node()), Some(span));
    assert_eq!(content(&anonymous.children[0]), Rect::default());
}

#[test]
fn test_inline_root_is_not_wrapped() {
    let mut dom = DomTree::new();
    let outer = root_div(&mut dom);
    let _ = element(&mut dom, outer, "span");
    let tree = StyledTree::from_dom(&dom, outer).unwrap();

    let root = create_layout(&tree, 0.0).unwrap();
    assert_eq!(root.box_type, BoxType::Inline);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].box_type, BoxType::Inline);
}

#[test]
fn test_inline_runs_between_blocks() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "  a  ");
    let inner = element(&mut dom, div, "div");
    let _ = dom.append_text(div, "  b  ");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);
    style(&mut tree, inner, &[("display", "block")]);

    let root = create_layout(&tree, 1234.0).unwrap();
    assert_eq!(root.children.len(), 3);

    let first = &root.children[0];
    assert!(first.is_anonymous());
    assert_eq!(content(first), rect(0.0, 0.0, 1234.0, 10.0));
    assert_eq!(first.children[0].children[0].text(), Some("a"));

    assert_eq!(content(&root.children[1]), rect(0.0, 10.0, 1234.0, 0.0));

    let last = &root.children[2];
    assert!(last.is_anonymous());
    assert_eq!(content(last), rect(0.0, 10.0, 1234.0, 10.0));
    assert_eq!(last.children[0].text(), Some("b"));
    assert_eq!(content(&last.children[0]), rect(0.0, 10.0, 5.0, 10.0));

    assert_eq!(content(&root).height, 20.0);
}

#[test]
fn test_whitespace_between_blocks_generates_nothing() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let first = element(&mut dom, div, "p");
    let _ = dom.append_text(div, "   ");
    let second = element(&mut dom, div, "p");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(&mut tree, first, &[("display", "block")]);
    style(&mut tree, second, &[("display", "block")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let kinds: Vec<_> = root.children.iter().map(|c| c.box_type.clone()).collect();
    assert_eq!(kinds, [BoxType::Block, BoxType::Block]);
}

#[test]
fn test_comments_generate_nothing() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let comment = dom.alloc(trellis_dom::NodeType::Comment("note".to_string()));
    dom.append_child(div, comment);
    let tree = StyledTree::from_dom(&dom, div).unwrap();

    let root = create_layout(&tree, 100.0).unwrap();
    assert!(root.children.is_empty());
}

// ---------------------------------------------------------------------------
// Inline formatting
// ---------------------------------------------------------------------------

#[test]
fn test_inline_box_covers_its_children() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let p = element(&mut dom, div, "p");
    let _ = dom.append_text(p, "   cr     ");
    let a = element(&mut dom, p, "a");
    let _ = dom.append_text(a, " lf   ");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let anonymous = &root.children[0];
    assert_eq!(content(anonymous), rect(0.0, 0.0, 100.0, 10.0));

    let p_box = &anonymous.children[0];
    assert_eq!(content(p_box), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(p_box.children[0].text(), Some("cr "));
    assert_eq!(content(&p_box.children[0]), rect(0.0, 0.0, 15.0, 10.0));

    let a_box = &p_box.children[1];
    assert_eq!(content(a_box), rect(15.0, 0.0, 10.0, 10.0));
    assert_eq!(a_box.children[0].text(), Some("lf"));
}

#[test]
fn test_adjacent_text_runs_share_a_line() {
    let mut dom = DomTree::new();
    let body = root_div(&mut dom);
    let _ = dom.append_text(body, "hello");
    let _ = dom.append_text(body, "goodbye");
    let mut tree = StyledTree::from_dom(&dom, body).unwrap();
    style(&mut tree, body, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let anonymous = &root.children[0];
    assert_eq!(content(anonymous), rect(0.0, 0.0, 100.0, 10.0));
    assert_eq!(content(&anonymous.children[0]), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(content(&anonymous.children[1]), rect(25.0, 0.0, 35.0, 10.0));
}

#[test]
fn test_whitespace_between_inline_boxes_is_kept() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let first = element(&mut dom, div, "span");
    let _ = dom.append_text(first, "hello");
    let _ = dom.append_text(div, "   ");
    let second = element(&mut dom, div, "span");
    let _ = dom.append_text(second, "world");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line.len(), 3);
    assert_eq!(line[1].text(), Some(" "));
    assert_eq!(content(&line[1]), rect(25.0, 0.0, 5.0, 10.0));
    assert_eq!(content(&line[2]), rect(30.0, 0.0, 25.0, 10.0));
}

#[test]
fn test_newline_collapses_to_space() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hi\nhi");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line.len(), 1);
    assert_eq!(line[0].text(), Some("hi hi"));
    assert_eq!(content(&line[0]), rect(0.0, 0.0, 25.0, 10.0));
}

#[test]
fn test_text_wraps_at_last_fitting_space() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hi hello");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 30.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 30.0, 20.0));
    let anonymous = &root.children[0];
    assert_eq!(content(anonymous), rect(0.0, 0.0, 30.0, 20.0));
    assert_eq!(anonymous.children.len(), 2);
    assert_eq!(anonymous.children[0].text(), Some("hi"));
    assert_eq!(content(&anonymous.children[0]), rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(anonymous.children[1].text(), Some("hello"));
    assert_eq!(content(&anonymous.children[1]), rect(0.0, 10.0, 25.0, 10.0));
}

#[test]
fn test_text_wraps_keeping_as_much_as_fits() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "oh no !! !");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 30.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line[0].text(), Some("oh no"));
    assert_eq!(content(&line[0]), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(line[1].text(), Some("!! !"));
    assert_eq!(content(&line[1]), rect(0.0, 10.0, 20.0, 10.0));
}

#[test]
fn test_word_that_fits_without_its_space_stays_on_the_line() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "xxxx ab cdefgh");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    // "xxxx ab" is 35px; with the space after it, it would be 40px.
    let root = create_layout(&tree, 36.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line.len(), 2);
    assert_eq!(line[0].text(), Some("xxxx ab"));
    assert_eq!(content(&line[0]), rect(0.0, 0.0, 35.0, 10.0));
    assert_eq!(line[1].text(), Some("cdefgh"));
    assert_eq!(content(&line[1]), rect(0.0, 10.0, 30.0, 10.0));
}

#[test]
fn test_trailing_space_is_dropped_when_the_next_box_wraps() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hello ");
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "world");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 30.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line[0].text(), Some("hello"));
    assert_eq!(content(&line[0]), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(content(&line[1]), rect(0.0, 10.0, 25.0, 10.0));
    assert_eq!(content(&line[1].children[0]), rect(0.0, 10.0, 25.0, 10.0));
    assert_eq!(content(&root), rect(0.0, 0.0, 30.0, 20.0));
}

#[test]
fn test_space_kept_when_the_next_box_shares_the_line() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hi ");
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "yo");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 30.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line[0].text(), Some("hi "));
    assert_eq!(content(&line[1]), rect(15.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_wrapped_text_root_becomes_an_inline_box() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let text = dom.append_text(div, "hi hello");
    let tree = StyledTree::from_dom(&dom, text).unwrap();

    // The default font is 16px, so characters are 8px wide.
    let root = create_layout(&tree, 30.0).unwrap();
    assert_eq!(root.box_type, BoxType::Inline);
    assert_eq!(root.text(), None);
    let texts: Vec<_> = root.children.iter().filter_map(LayoutBox::text).collect();
    assert_eq!(texts, ["hi", "hello"]);
    assert_eq!(content(&root.children[1]), rect(0.0, 16.0, 40.0, 16.0));
    assert_eq!(content(&root), rect(0.0, 0.0, 40.0, 32.0));
}

#[test]
fn test_unwrapped_text_root_is_a_text_box() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let text = dom.append_text(div, "hi");
    let tree = StyledTree::from_dom(&dom, text).unwrap();

    let root = create_layout(&tree, 30.0).unwrap();
    assert_eq!(root.text(), Some("hi"));
    assert!(root.children.is_empty());
}

#[test]
fn test_inline_width_limits_every_line() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "xxxxxxxxxxxxxxxxxxxx");
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "aa bb cc dd ee ff gg hh");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);
    style(&mut tree, span, &[("width", "50px")]);

    let root = create_layout(&tree, 300.0).unwrap();
    let span_box = &root.children[0].children[1];
    let lines: Vec<_> = span_box
        .children
        .iter()
        .map(|b| (b.text().unwrap_or_default(), content(b)))
        .collect();
    assert_eq!(
        lines,
        [
            ("aa bb cc", rect(100.0, 0.0, 40.0, 10.0)),
            ("dd ee ff", rect(0.0, 10.0, 40.0, 10.0)),
            ("gg hh", rect(0.0, 20.0, 25.0, 10.0)),
        ]
    );
    assert!(span_box.children.iter().all(|b| content(b).width <= 50.0));
}

#[test]
fn test_unbreakable_word_overflows() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hello");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 15.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 15.0, 10.0));
    assert_eq!(content(&root.children[0]), rect(0.0, 0.0, 15.0, 10.0));
    assert_eq!(content(&root.children[0].children[0]), rect(0.0, 0.0, 25.0, 10.0));
}

#[test]
fn test_nowrap_never_breaks() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hi hello");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(
        &mut tree,
        div,
        &[("display", "block"), ("font-size", "10px"), ("white-space", "nowrap")],
    );

    let root = create_layout(&tree, 30.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(line.len(), 1);
    assert_eq!(content(&line[0]), rect(0.0, 0.0, 40.0, 10.0));
}

#[test]
fn test_pre_newlines_are_forced_breaks() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "a\nbb");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(
        &mut tree,
        div,
        &[("display", "block"), ("font-size", "10px"), ("white-space", "pre")],
    );

    let root = create_layout(&tree, 1000.0).unwrap();
    let anonymous = &root.children[0];
    assert_eq!(anonymous.children[0].text(), Some("a"));
    assert_eq!(content(&anonymous.children[0]), rect(0.0, 0.0, 5.0, 10.0));
    assert_eq!(anonymous.children[1].text(), Some("bb"));
    assert_eq!(content(&anonymous.children[1]), rect(0.0, 10.0, 10.0, 10.0));
    assert_eq!(content(anonymous).height, 20.0);
}

#[test]
fn test_br_ends_the_line() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hello");
    let br = element(&mut dom, div, "br");
    let _ = dom.append_text(div, "world");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 25.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 25.0, 20.0));
    let anonymous = &root.children[0];
    assert_eq!(content(anonymous), rect(0.0, 0.0, 25.0, 20.0));

    let line = &anonymous.children;
    assert_eq!(content(&line[0]), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(line[1].box_type, BoxType::LineBreak);
    assert_eq!(line[1].node.map(|n| n.dom_node()), Some(br));
    assert_eq!(content(&line[1]), rect(25.0, 0.0, 0.0, 0.0));
    assert_eq!(content(&line[2]), rect(0.0, 10.0, 25.0, 10.0));
}

#[test]
fn test_consecutive_brs_leave_a_blank_line() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "a");
    let _ = element(&mut dom, div, "br");
    let _ = element(&mut dom, div, "br");
    let _ = dom.append_text(div, "b");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(content(&line[3]), rect(0.0, 20.0, 5.0, 10.0));
    assert_eq!(content(&root).height, 30.0);
}

#[test]
fn test_inline_root_shrinks_to_content() {
    let mut dom = DomTree::new();
    let span = root_div(&mut dom);
    let _ = dom.append_text(span, "hello");
    let mut tree = StyledTree::from_dom(&dom, span).unwrap();
    style(&mut tree, span, &[("font-size", "10px"), ("font-weight", "bold")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(content(&root.children[0]), rect(0.0, 0.0, 25.0, 10.0));
}

#[test]
fn test_missing_font_falls_back_with_warning() {
    let mut dom = DomTree::new();
    let span = root_div(&mut dom);
    let _ = dom.append_text(span, "hello");
    let mut tree = StyledTree::from_dom(&dom, span).unwrap();
    style(
        &mut tree,
        span,
        &[("font-size", "10px"), ("font-family", "\"No Such Font\"")],
    );

    let output = create_layout_with_diagnostics(&tree, 100.0, &NoFontMetrics, &NoReplacedSizing);
    let root = output.root.unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 25.0, 10.0));
    assert_eq!(
        output.warnings,
        [Warning::MissingFont {
            families: "No Such Font".to_string()
        }]
    );
}

#[test]
fn test_block_inside_inline_splits_the_line() {
    let mut dom = DomTree::new();
    let span = root_div(&mut dom);
    let _ = dom.append_text(span, "a");
    let inner = element(&mut dom, span, "div");
    let _ = dom.append_text(span, "b");
    let mut tree = StyledTree::from_dom(&dom, span).unwrap();
    style(&mut tree, span, &[("font-size", "10px")]);
    style(&mut tree, inner, &[("display", "block")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root.children[0]), rect(0.0, 0.0, 5.0, 10.0));
    assert_eq!(content(&root.children[1]), rect(0.0, 10.0, 100.0, 0.0));
    assert_eq!(content(&root.children[2]), rect(0.0, 10.0, 5.0, 10.0));
    assert_eq!(content(&root), rect(0.0, 0.0, 100.0, 20.0));
}

#[test]
fn test_inline_edges_move_the_pen() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "ab");
    let _ = dom.append_text(div, "c");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);
    style(
        &mut tree,
        span,
        &[("padding-left", "10px"), ("padding-right", "10px")],
    );

    let root = create_layout(&tree, 100.0).unwrap();
    let line = &root.children[0].children;
    assert_eq!(content(&line[0]), rect(10.0, 0.0, 10.0, 10.0));
    assert_eq!(line[0].dimensions.border_box().x, 0.0);
    assert_eq!(content(&line[1]), rect(30.0, 0.0, 5.0, 10.0));
}

#[test]
fn test_height_does_not_apply_to_inline_boxes() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);
    style(&mut tree, span, &[("height", "100px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root).height, 0.0);
    assert_eq!(content(&root.children[0]).height, 0.0);
}

#[test]
fn test_inline_box_height_comes_from_its_text() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "hi");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);
    style(&mut tree, span, &[("height", "100px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root).height, 10.0);
    assert_eq!(content(&root.children[0]).height, 10.0);
}

#[test]
fn test_height_applies_once_block() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(&mut tree, span, &[("display", "block"), ("height", "100px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root).height, 100.0);
}

// ---------------------------------------------------------------------------
// Widths
// ---------------------------------------------------------------------------

#[test]
fn test_auto_width_fills_containing_block() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(&mut tree, child, &[("display", "block")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 1000.0, 0.0));
    assert_eq!(content(&root.children[0]), rect(0.0, 0.0, 1000.0, 0.0));
}

#[test]
fn test_percentage_widths_nest() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let grandchild = element(&mut dom, child, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("width", "100px")]);
    style(&mut tree, child, &[("display", "block"), ("width", "50%")]);
    style(&mut tree, grandchild, &[("display", "block"), ("width", "50%")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).width, 100.0);
    assert_eq!(content(&root.children[0]).width, 50.0);
    assert_eq!(content(&root.children[0].children[0]).width, 25.0);
}

#[test]
fn test_min_width_wins_over_containing_block() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("min-width", "100px")]);
    style(&mut tree, child, &[("display", "block"), ("min-width", "50%")]);

    let root = create_layout(&tree, 20.0).unwrap();
    assert_eq!(content(&root).width, 100.0);
    assert_eq!(content(&root.children[0]).width, 100.0);
}

#[test]
fn test_max_width_clamps() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("max-width", "200px")]);
    style(&mut tree, child, &[("display", "block"), ("max-width", "50%")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).width, 200.0);
    assert_eq!(content(&root.children[0]).width, 100.0);
}

#[test]
fn test_auto_margins_center() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(
        &mut tree,
        child,
        &[
            ("display", "block"),
            ("width", "50px"),
            ("margin-left", "auto"),
            ("margin-right", "auto"),
        ],
    );

    let root = create_layout(&tree, 100.0).unwrap();
    let child_box = &root.children[0];
    assert_eq!(content(child_box).x, 25.0);
    assert_eq!(child_box.dimensions.margin.left, 25.0);
    assert_eq!(child_box.dimensions.margin.right, 25.0);
}

#[test]
fn test_single_auto_margin_takes_the_rest() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(
        &mut tree,
        child,
        &[("display", "block"), ("width", "60px"), ("margin-left", "auto")],
    );

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root.children[0]).x, 40.0);
}

#[test]
fn test_over_constrained_margins_are_kept() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(
        &mut tree,
        child,
        &[
            ("display", "block"),
            ("width", "50px"),
            ("margin-left", "10px"),
            ("margin-right", "10px"),
        ],
    );

    let root = create_layout(&tree, 100.0).unwrap();
    let margin = root.children[0].dimensions.margin;
    assert_eq!(margin.left, 10.0);
    assert_eq!(margin.right, 10.0);
}

// ---------------------------------------------------------------------------
// Heights
// ---------------------------------------------------------------------------

#[test]
fn test_height_does_not_affect_children() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("height", "100px")]);
    style(&mut tree, child, &[("display", "block")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).height, 100.0);
    assert_eq!(content(&root.children[0]).height, 0.0);
}

#[test]
fn test_siblings_stack() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let first = element(&mut dom, div, "div");
    let second = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(&mut tree, first, &[("display", "block"), ("height", "25px")]);
    style(&mut tree, second, &[("display", "block"), ("height", "25px")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root.children[1]).y, 25.0);
    assert_eq!(content(&root).height, 50.0);
}

#[test]
fn test_min_and_max_height() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("max-height", "10px")]);
    style(&mut tree, child, &[("display", "block"), ("height", "400px")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).height, 10.0);
    assert_eq!(content(&root.children[0]).height, 400.0);

    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("min-height", "400px")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).height, 400.0);
}

#[test]
fn test_auto_height_wraps_children() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("height", "auto")]);
    style(&mut tree, child, &[("display", "block"), ("height", "10px")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).height, 10.0);
}

#[test]
fn test_percentage_height_needs_a_definite_parent() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("height", "200px")]);
    style(&mut tree, child, &[("display", "block"), ("height", "50%")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root.children[0]).height, 100.0);

    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(&mut tree, child, &[("display", "block"), ("height", "50%")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root.children[0]).height, 0.0);
}

// ---------------------------------------------------------------------------
// Padding, border, margin
// ---------------------------------------------------------------------------

#[test]
fn test_padding() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let padded = element(&mut dom, div, "div");
    let next = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(
        &mut tree,
        padded,
        &[
            ("display", "block"),
            ("height", "100px"),
            ("padding-top", "10px"),
            ("padding-right", "10px"),
            ("padding-bottom", "10px"),
            ("padding-left", "10px"),
        ],
    );
    style(&mut tree, next, &[("display", "block")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root.children[0]), rect(10.0, 10.0, 80.0, 100.0));
    assert_eq!(content(&root.children[1]).y, 120.0);
    assert_eq!(content(&root).height, 120.0);
}

#[test]
fn test_border() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let bordered = element(&mut dom, div, "div");
    let next = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    style(
        &mut tree,
        bordered,
        &[
            ("display", "block"),
            ("height", "100px"),
            ("border-left-width", "10px"),
            ("border-right-width", "12px"),
            ("border-top-width", "14px"),
            ("border-bottom-width", "16px"),
            ("border-left-style", "solid"),
            ("border-right-style", "solid"),
            ("border-top-style", "solid"),
            ("border-bottom-style", "solid"),
        ],
    );
    style(&mut tree, next, &[("display", "block")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root.children[0]), rect(10.0, 14.0, 78.0, 100.0));
    assert_eq!(content(&root.children[1]).y, 130.0);
}

#[test]
fn test_border_without_style_has_no_width() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(
        &mut tree,
        div,
        &[("display", "block"), ("border-left-width", "10px")],
    );

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(root.dimensions.border.left, 0.0);
    assert_eq!(content(&root), rect(0.0, 0.0, 100.0, 0.0));
}

#[test]
fn test_border_width_keyword() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(
        &mut tree,
        div,
        &[
            ("display", "block"),
            ("border-left-width", "thin"),
            ("border-left-style", "solid"),
        ],
    );

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(root.dimensions.border.left, 3.0);
    assert_eq!(content(&root).x, 3.0);
}

#[test]
fn test_margins_do_not_collapse() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let first = element(&mut dom, div, "div");
    let second = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);
    for node in [first, second] {
        style(
            &mut tree,
            node,
            &[
                ("display", "block"),
                ("margin-top", "10px"),
                ("margin-right", "10px"),
                ("margin-bottom", "10px"),
                ("margin-left", "10px"),
            ],
        );
    }

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root.children[0]), rect(10.0, 10.0, 80.0, 0.0));
    assert_eq!(root.children[1].dimensions.margin_box().y, 20.0);
    assert_eq!(content(&root.children[1]).y, 30.0);
    assert_eq!(content(&root).height, 40.0);
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

#[test]
fn test_em_follows_font_size() {
    for (font_size, expected) in [("10px", 100.0), ("20px", 200.0)] {
        let mut dom = DomTree::new();
        let div = root_div(&mut dom);
        let mut tree = StyledTree::from_dom(&dom, div).unwrap();
        style(
            &mut tree,
            div,
            &[
                ("display", "block"),
                ("font-size", font_size),
                ("width", "10em"),
                ("height", "10em"),
            ],
        );

        let root = create_layout(&tree, 1000.0).unwrap();
        assert_eq!(content(&root), rect(0.0, 0.0, expected, expected));
    }
}

#[test]
fn test_px_ignores_font_size() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(
        &mut tree,
        div,
        &[("display", "block"), ("font-size", "20px"), ("width", "100px")],
    );

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).width, 100.0);
}

#[test]
fn test_rem_follows_root_font_size() {
    for (root_size, expected) in [(Some("10px"), 20.0), (None, 32.0)] {
        let mut dom = DomTree::new();
        let div = root_div(&mut dom);
        let child = element(&mut dom, div, "div");
        let mut tree = StyledTree::from_dom(&dom, div).unwrap();
        style(&mut tree, div, &[("display", "block")]);
        if let Some(size) = root_size {
            style(&mut tree, div, &[("font-size", size)]);
        }
        style(
            &mut tree,
            child,
            &[("display", "block"), ("font-size", "30px"), ("width", "2rem")],
        );

        let root = create_layout(&tree, 1000.0).unwrap();
        assert_eq!(content(&root.children[0]).width, expected);
    }
}

#[test]
fn test_percentages_of_containing_block() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("width", "50%")]);
    style(&mut tree, child, &[("display", "block"), ("width", "50%")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).width, 500.0);
    assert_eq!(content(&root.children[0]).width, 250.0);
}

// ---------------------------------------------------------------------------
// Invalid and edge values
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_width_is_auto() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("width", "asdf")]);

    let output =
        create_layout_with_diagnostics(&tree, 1000.0, &ApproximateFontMetrics, &NoReplacedSizing);
    assert_eq!(content(output.root.as_ref().unwrap()).width, 1000.0);
    assert_eq!(
        output.warnings,
        [Warning::InvalidLength {
            property: "width".to_string(),
            value: "asdf".to_string(),
        }]
    );
}

#[test]
fn test_invalid_max_width_does_not_clamp() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("max-width", "asdf")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root).width, 1000.0);
}

#[test]
fn test_invalid_height_is_auto() {
    for height in ["no", "0notarealunit"] {
        let mut dom = DomTree::new();
        let div = root_div(&mut dom);
        let mut tree = StyledTree::from_dom(&dom, div).unwrap();
        style(&mut tree, div, &[("display", "block"), ("height", height)]);

        let root = create_layout(&tree, 1000.0).unwrap();
        assert_eq!(content(&root).height, 0.0);
    }
}

#[test]
fn test_unknown_unit_is_reported() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("height", "0notarealunit")]);

    let output =
        create_layout_with_diagnostics(&tree, 1000.0, &ApproximateFontMetrics, &NoReplacedSizing);
    assert_eq!(
        output.warnings,
        [Warning::UnsupportedUnit {
            property: "height".to_string(),
            unit: "notarealunit".to_string(),
            value: "0notarealunit".to_string(),
        }]
    );
}

#[test]
fn test_max_none_is_unbounded() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(
        &mut tree,
        div,
        &[
            ("display", "block"),
            ("width", "100px"),
            ("height", "100px"),
            ("max-width", "none"),
            ("max-height", "none"),
        ],
    );

    let root = create_layout(&tree, 0.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 100.0, 100.0));
    assert_eq!(root.dimensions.margin.left, 0.0);
    assert_eq!(root.dimensions.margin.right, 0.0);
}

#[test]
fn test_negative_width_is_treated_as_zero() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);

    let root = create_layout(&tree, -50.0).unwrap();
    assert_eq!(content(&root).width, 0.0);
}

#[test]
fn test_var_substitutes_lengths() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let child = element(&mut dom, div, "div");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("--gap", "40px")]);
    style(&mut tree, child, &[("display", "block"), ("width", "var(--gap)")]);

    let root = create_layout(&tree, 1000.0).unwrap();
    assert_eq!(content(&root.children[0]).width, 40.0);
}

#[test]
fn test_unresolved_var_is_auto() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("width", "var(--missing)")]);

    let output =
        create_layout_with_diagnostics(&tree, 1000.0, &ApproximateFontMetrics, &NoReplacedSizing);
    assert_eq!(content(output.root.as_ref().unwrap()).width, 1000.0);
    assert!(
        output
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::UnresolvedVariable { .. }))
    );
}

// ---------------------------------------------------------------------------
// Replaced elements
// ---------------------------------------------------------------------------

#[test]
fn test_img_without_alt_is_empty() {
    let mut dom = DomTree::new();
    let document = dom.root();
    let img = element(&mut dom, document, "img");
    let mut tree = StyledTree::from_dom(&dom, img).unwrap();
    style(&mut tree, img, &[("display", "block")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 100.0, 0.0));
    assert_eq!(root.text(), None);
}

#[test]
fn test_img_alt_text_is_one_line() {
    let mut dom = DomTree::new();
    let document = dom.root();
    let img = dom.append_element(document, ElementData::new("img").with_attr("alt", "hello"));
    let mut tree = StyledTree::from_dom(&dom, img).unwrap();
    style(&mut tree, img, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 100.0, 10.0));
    assert_eq!(root.text(), Some("hello"));
}

#[test]
fn test_img_uses_intrinsic_size() {
    let mut dom = DomTree::new();
    let document = dom.root();
    let img = dom.append_element(document, ElementData::new("img").with_attr("alt", "hello"));
    let mut tree = StyledTree::from_dom(&dom, img).unwrap();
    style(&mut tree, img, &[("display", "block")]);

    let sizing = |_: &ElementData| Some(Size::new(37.0, 87.0));
    let root = create_layout_with(&tree, 100.0, &ApproximateFontMetrics, &sizing).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 37.0, 87.0));
}

#[test]
fn test_img_scales_with_specified_width() {
    let mut dom = DomTree::new();
    let document = dom.root();
    let img = element(&mut dom, document, "img");
    let mut tree = StyledTree::from_dom(&dom, img).unwrap();
    style(&mut tree, img, &[("display", "block"), ("width", "74px")]);

    let sizing = |_: &ElementData| Some(Size::new(37.0, 87.0));
    let root = create_layout_with(&tree, 100.0, &ApproximateFontMetrics, &sizing).unwrap();
    assert_eq!(content(&root), rect(0.0, 0.0, 74.0, 174.0));
}

#[test]
fn test_inline_img_sits_on_the_line() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "ab");
    let _ = dom.append_element(div, ElementData::new("img").with_attr("alt", "hi"));
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let line = &root.children[0].children;
    assert!(matches!(line[1].box_type, BoxType::Replaced { inline: true, .. }));
    assert_eq!(content(&line[1]), rect(10.0, 0.0, 10.0, 10.0));
}

// ---------------------------------------------------------------------------
// Queries and serialization
// ---------------------------------------------------------------------------

#[test]
fn test_box_at_and_iter() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let _ = dom.append_text(div, "hi hello");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("font-size", "10px")]);

    let root = create_layout(&tree, 30.0).unwrap();
    assert_eq!(root.box_at(2.0, 12.0).and_then(LayoutBox::text), Some("hello"));
    assert!(root.box_at(28.0, 12.0).is_some_and(LayoutBox::is_anonymous));
    assert!(root.box_at(31.0, 12.0).is_none());

    let texts: Vec<_> = root.iter().filter_map(LayoutBox::text).collect();
    assert_eq!(texts, ["hi", "hello"]);
    assert_eq!(root.iter().count(), 4);
}

#[test]
fn test_layout_serializes() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block")]);

    let root = create_layout(&tree, 100.0).unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["box_type"], "Block");
    assert_eq!(json["node"], 0);
    assert_eq!(json["dimensions"]["content"]["width"], 100.0);
}

#[test]
fn test_layout_is_deterministic() {
    let mut dom = DomTree::new();
    let div = root_div(&mut dom);
    let span = element(&mut dom, div, "span");
    let _ = dom.append_text(span, "one two three");
    let _ = element(&mut dom, div, "br");
    let _ = dom.append_text(div, "four");
    let mut tree = StyledTree::from_dom(&dom, div).unwrap();
    style(&mut tree, div, &[("display", "block"), ("padding-left", "5%")]);

    let first = create_layout(&tree, 40.0);
    let second = create_layout(&tree, 40.0);
    assert!(first.is_some());
    assert_eq!(first, second);
}
