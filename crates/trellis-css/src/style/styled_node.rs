//! The styled tree: DOM nodes annotated with their cascaded declarations.
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//!
//! Selector matching and the cascade happen upstream. What arrives here is,
//! for every node, the ordered list of winning declarations as raw strings.
//! The tree is an arena: nodes are addressed by [`StyledId`] and store their
//! parent's id, so percentage, `em` and inheritance lookups can walk upward
//! without reference cycles.
//!
//! Typed accessors live on [`StyledNode`]. They resolve `var()`, the CSS-wide
//! keywords and inheritance, and never fail: anything unparsable degrades to
//! the property's initial (or inherited) value and is reported through the
//! [`Diagnostics`] passed in.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;
use trellis_common::{Diagnostics, Warning};
use trellis_dom::{DomTree, ElementData, NodeId, NodeType};

use super::property_id::PropertyId;
use super::substitute::{contains_var, substitute_var};
use super::values::{
    BorderStyle, Color, DEFAULT_FONT_SIZE_PX, Display, Float, FontStyle, FontWeight,
    LengthValue, TextDecorationLine, TextTransform, WhiteSpace, absolute_size_keyword,
    parse_font_family,
};

/// Index of a node in a [`StyledTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StyledId(pub usize);

/// Errors raised while building a styled tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleTreeError {
    /// The styled id does not belong to this tree.
    #[error("styled node {0:?} does not exist")]
    UnknownStyledNode(StyledId),
    /// The DOM id does not belong to the tree's DOM.
    #[error("DOM node {0:?} does not exist")]
    UnknownDomNode(NodeId),
    /// [§ 2 Defining Custom Properties](https://www.w3.org/TR/css-variables-1/#defining-variables)
    /// "A custom property is any property whose name starts with two dashes"
    #[error("'{0}' is not a custom property name")]
    InvalidCustomPropertyName(String),
    /// Neither a supported longhand nor a custom property.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
}

#[derive(Debug, Clone)]
struct StyledData {
    node: NodeId,
    properties: Vec<(PropertyId, String)>,
    custom_properties: Vec<(String, String)>,
    parent: Option<StyledId>,
    children: Vec<StyledId>,
}

impl StyledData {
    const fn new(node: NodeId, parent: Option<StyledId>) -> Self {
        Self {
            node,
            properties: Vec::new(),
            custom_properties: Vec::new(),
            parent,
            children: Vec::new(),
        }
    }
}

/// Arena of styled nodes over a borrowed DOM.
///
/// Parent links are set as children are appended, so once building is done
/// the tree is complete and layout only reads it.
#[derive(Debug, Clone)]
pub struct StyledTree<'dom> {
    dom: &'dom DomTree,
    nodes: Vec<StyledData>,
}

impl<'dom> StyledTree<'dom> {
    /// Start a tree whose root styles `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleTreeError::UnknownDomNode`] if `root` is not in `dom`.
    pub fn new(dom: &'dom DomTree, root: NodeId) -> Result<Self, StyleTreeError> {
        if dom.get(root).is_none() {
            return Err(StyleTreeError::UnknownDomNode(root));
        }
        Ok(Self {
            dom,
            nodes: vec![StyledData::new(root, None)],
        })
    }

    /// Mirror the DOM subtree under `root`, skipping comments. Every node
    /// starts with no declarations.
    ///
    /// # Errors
    ///
    /// Returns [`StyleTreeError::UnknownDomNode`] if `root` is not in `dom`.
    pub fn from_dom(dom: &'dom DomTree, root: NodeId) -> Result<Self, StyleTreeError> {
        let mut tree = Self::new(dom, root)?;
        let mut stack = vec![(StyledId(0), root)];
        while let Some((styled, node)) = stack.pop() {
            for &child in dom.children(node).iter().rev() {
                if matches!(dom.get(child).map(|n| &n.node_type), Some(NodeType::Comment(_))) {
                    continue;
                }
                let child_id = tree.append_child(styled, child)?;
                stack.push((child_id, child));
            }
            // Children were pushed in reverse so the stack pops them in order;
            // restore document order in the parent's list.
            tree.nodes[styled.0].children.reverse();
        }
        Ok(tree)
    }

    /// Append a styled child for DOM node `node` under `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown.
    pub fn append_child(
        &mut self,
        parent: StyledId,
        node: NodeId,
    ) -> Result<StyledId, StyleTreeError> {
        if self.dom.get(node).is_none() {
            return Err(StyleTreeError::UnknownDomNode(node));
        }
        if parent.0 >= self.nodes.len() {
            return Err(StyleTreeError::UnknownStyledNode(parent));
        }
        let id = StyledId(self.nodes.len());
        self.nodes.push(StyledData::new(node, Some(parent)));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Set (or replace) the declared value of a longhand property.
    ///
    /// # Errors
    ///
    /// Returns [`StyleTreeError::UnknownStyledNode`] for a foreign id.
    pub fn set_property(
        &mut self,
        id: StyledId,
        property: PropertyId,
        value: &str,
    ) -> Result<(), StyleTreeError> {
        let data = self
            .nodes
            .get_mut(id.0)
            .ok_or(StyleTreeError::UnknownStyledNode(id))?;
        match data.properties.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.properties.push((property, value.to_string())),
        }
        Ok(())
    }

    /// Set (or replace) a custom property such as `--gap`.
    ///
    /// # Errors
    ///
    /// Fails for a foreign id or a name not starting with `--`.
    pub fn set_custom_property(
        &mut self,
        id: StyledId,
        name: &str,
        value: &str,
    ) -> Result<(), StyleTreeError> {
        if !name.starts_with("--") {
            return Err(StyleTreeError::InvalidCustomPropertyName(name.to_string()));
        }
        let data = self
            .nodes
            .get_mut(id.0)
            .ok_or(StyleTreeError::UnknownStyledNode(id))?;
        match data.custom_properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.custom_properties.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Set a declaration by its CSS name, dispatching to
    /// [`set_custom_property`](Self::set_custom_property) for `--*` names.
    ///
    /// # Errors
    ///
    /// Fails for a foreign id or an unsupported property name.
    pub fn set_declaration(
        &mut self,
        id: StyledId,
        name: &str,
        value: &str,
    ) -> Result<(), StyleTreeError> {
        let name = name.trim();
        if name.starts_with("--") {
            return self.set_custom_property(id, name, value);
        }
        let property = PropertyId::from_str(name)
            .map_err(|_| StyleTreeError::UnknownProperty(name.to_string()))?;
        self.set_property(id, property, value)
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> StyledNode<'_> {
        StyledNode {
            tree: self,
            id: StyledId(0),
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: StyledId) -> Option<StyledNode<'_>> {
        (id.0 < self.nodes.len()).then_some(StyledNode { tree: self, id })
    }

    /// The first styled node (in creation order) that styles `node`.
    #[must_use]
    pub fn find(&self, node: NodeId) -> Option<StyledId> {
        self.nodes.iter().position(|d| d.node == node).map(StyledId)
    }

    /// The DOM this tree styles.
    #[must_use]
    pub const fn dom(&self) -> &'dom DomTree {
        self.dom
    }

    /// Number of styled nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
///
/// What a declaration asks for once `var()` and the CSS-wide keywords have
/// been dealt with.
enum Specified {
    Value(String),
    Inherit,
    Initial,
}

/// A read-only handle to one node of a [`StyledTree`].
#[derive(Clone, Copy)]
pub struct StyledNode<'a> {
    tree: &'a StyledTree<'a>,
    id: StyledId,
}

impl PartialEq for StyledNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for StyledNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("StyledNode");
        let _ = s.field("id", &self.id.0);
        if let Some(element) = self.element() {
            let _ = s.field("tag", &element.tag_name);
        }
        s.finish()
    }
}

impl Serialize for StyledNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id.serialize(serializer)
    }
}

impl<'a> StyledNode<'a> {
    fn data(&self) -> &'a StyledData {
        &self.tree.nodes[self.id.0]
    }

    /// This node's arena index.
    #[must_use]
    pub const fn id(&self) -> StyledId {
        self.id
    }

    /// The DOM node this styles.
    #[must_use]
    pub fn dom_node(&self) -> NodeId {
        self.data().node
    }

    /// The element data, if this styles an element.
    #[must_use]
    pub fn element(&self) -> Option<&'a ElementData> {
        self.tree.dom.as_element(self.dom_node())
    }

    /// The character data, if this styles a text node.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        self.tree.dom.as_text(self.dom_node())
    }

    /// The type of the DOM node this styles.
    #[must_use]
    pub fn node_type(&self) -> Option<&'a NodeType> {
        self.tree.dom.get(self.dom_node()).map(|n| &n.node_type)
    }

    /// The parent node, `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| Self {
            tree: self.tree,
            id,
        })
    }

    /// Children in document order.
    pub fn children(&self) -> impl Iterator<Item = StyledNode<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| StyledNode { tree, id })
    }

    /// The root of the tree.
    #[must_use]
    pub const fn root(&self) -> Self {
        Self {
            tree: self.tree,
            id: StyledId(0),
        }
    }

    /// The raw declared value, exactly as set.
    #[must_use]
    pub fn declared(&self, property: PropertyId) -> Option<&'a str> {
        self.data()
            .properties
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// [§ 2 Defining Custom Properties](https://www.w3.org/TR/css-variables-1/#defining-variables)
    ///
    /// "Custom properties are ordinary properties ... they are inherited"
    #[must_use]
    pub fn custom_property(&self, name: &str) -> Option<&'a str> {
        let own = self
            .data()
            .custom_properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str());
        own.or_else(|| self.parent().and_then(|p| p.custom_property(name)))
    }

    fn specified(&self, property: PropertyId, diag: &Diagnostics) -> Specified {
        let unset = || {
            if property.is_inherited() {
                Specified::Inherit
            } else {
                Specified::Initial
            }
        };
        let Some(raw) = self.declared(property) else {
            return unset();
        };

        let value = if contains_var(raw) {
            let lookup = |name: &str| self.custom_property(name).map(str::to_string);
            match substitute_var(raw, &lookup, 0) {
                Some(v) => v,
                None => {
                    // [§ 3.1](https://www.w3.org/TR/css-variables-1/#invalid-at-computed-value-time)
                    // "the property's value is the unset value"
                    diag.warn(Warning::UnresolvedVariable {
                        property: property.to_string(),
                        value: raw.to_string(),
                    });
                    return unset();
                }
            }
        } else {
            raw.to_string()
        };

        let value = value.trim();
        if value.eq_ignore_ascii_case("inherit") {
            Specified::Inherit
        } else if value.eq_ignore_ascii_case("initial") {
            Specified::Initial
        } else if value.eq_ignore_ascii_case("unset") {
            unset()
        } else {
            Specified::Value(value.to_string())
        }
    }

    /// The declared value with `var()`, the CSS-wide keywords and
    /// inheritance applied, still as text. Used by the length resolver.
    #[must_use]
    pub fn get_raw_property(&self, property: PropertyId, diag: &Diagnostics) -> String {
        match self.specified(property, diag) {
            Specified::Value(v) => v,
            Specified::Initial => property.initial_value().to_string(),
            Specified::Inherit => self.parent().map_or_else(
                || property.initial_value().to_string(),
                |p| p.get_raw_property(property, diag),
            ),
        }
    }

    /// Shared computed-value logic for typed accessors.
    ///
    /// `parse` turns a specified value into a computed one; on failure a
    /// warning is recorded and the property behaves as `unset`.
    fn computed<T>(
        &self,
        property: PropertyId,
        diag: &Diagnostics,
        initial: &dyn Fn(&Self) -> T,
        parse: &dyn Fn(&Self, &str) -> Option<T>,
    ) -> T {
        let inherit = || {
            self.parent().map_or_else(
                || initial(self),
                |p| p.computed(property, diag, initial, parse),
            )
        };
        match self.specified(property, diag) {
            Specified::Inherit => inherit(),
            Specified::Initial => initial(self),
            Specified::Value(raw) => parse(self, &raw).unwrap_or_else(|| {
                diag.warn(Warning::UnknownKeyword {
                    property: property.to_string(),
                    value: raw.clone(),
                });
                if property.is_inherited() {
                    inherit()
                } else {
                    initial(self)
                }
            }),
        }
    }

    fn keyword<T: FromStr + Default>(&self, property: PropertyId, diag: &Diagnostics) -> T {
        self.computed(property, diag, &|_| T::default(), &|_, raw| raw.parse().ok())
    }

    /// [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
    #[must_use]
    pub fn display(&self, diag: &Diagnostics) -> Display {
        self.computed(PropertyId::Display, diag, &|_| Display::Inline, &|_, raw| {
            Display::parse(raw)
        })
    }

    /// [§ 9.5.1 The 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    #[must_use]
    pub fn float(&self, diag: &Diagnostics) -> Float {
        self.keyword(PropertyId::Float, diag)
    }

    /// [§ 3.1 Font family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
    ///
    /// The family list in preference order; empty means "engine default".
    #[must_use]
    pub fn font_family(&self, diag: &Diagnostics) -> Vec<String> {
        self.computed(PropertyId::FontFamily, diag, &|_| Vec::new(), &|_, raw| {
            Some(parse_font_family(raw))
        })
    }

    /// [§ 3.5 Font size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    ///
    /// Computed font size in pixels. `em` and percentages refer to the
    /// parent's font size, `rem` to the root's.
    #[must_use]
    pub fn font_size(&self, diag: &Diagnostics) -> f32 {
        self.computed(
            PropertyId::FontSize,
            diag,
            &|_| DEFAULT_FONT_SIZE_PX,
            &|node, raw| node.parse_font_size(raw, diag),
        )
    }

    fn parse_font_size(&self, raw: &str, diag: &Diagnostics) -> Option<f32> {
        let parent_size = || self.parent().map_or(DEFAULT_FONT_SIZE_PX, |p| p.font_size(diag));
        let lower = raw.to_ascii_lowercase();
        if let Some(size) = absolute_size_keyword(&lower) {
            return Some(size);
        }
        // "larger/smaller: ... a ratio of 1.2 is suggested"
        match lower.as_str() {
            "larger" => return Some(parent_size() * 1.2),
            "smaller" => return Some(parent_size() / 1.2),
            _ => {}
        }
        let size = match LengthValue::parse(raw).ok()? {
            LengthValue::Px(px) => px,
            LengthValue::Em(em) => em * parent_size(),
            LengthValue::Percent(pct) => pct * parent_size() / 100.0,
            LengthValue::Rem(rem) => {
                // On the root itself rem refers to the initial font size.
                let root_size = if self.parent().is_none() {
                    DEFAULT_FONT_SIZE_PX
                } else {
                    self.root_font_size(diag)
                };
                rem * root_size
            }
        };
        // "Negative values are not allowed."
        (size >= 0.0).then_some(size)
    }

    /// The root element's computed font size, the base for `rem`.
    #[must_use]
    pub fn root_font_size(&self, diag: &Diagnostics) -> f32 {
        self.root().font_size(diag)
    }

    /// [§ 3.4 Font style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
    #[must_use]
    pub fn font_style(&self, diag: &Diagnostics) -> FontStyle {
        // `oblique <angle>` is accepted; the angle is not used.
        self.computed(PropertyId::FontStyle, diag, &|_| FontStyle::Normal, &|_, raw| {
            raw.split_ascii_whitespace().next()?.parse().ok()
        })
    }

    /// [§ 3.2 Font weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
    ///
    /// `bolder` and `lighter` are relative to the parent's weight.
    #[must_use]
    pub fn font_weight(&self, diag: &Diagnostics) -> FontWeight {
        self.computed(
            PropertyId::FontWeight,
            diag,
            &|_| FontWeight::NORMAL,
            &|node, raw| {
                let parent = || node.parent().map_or(FontWeight::NORMAL, |p| p.font_weight(diag));
                match raw.to_ascii_lowercase().as_str() {
                    "bolder" => Some(parent().bolder()),
                    "lighter" => Some(parent().lighter()),
                    _ => FontWeight::parse_absolute(raw),
                }
            },
        )
    }

    /// [§ 2.1 Text decoration lines](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
    ///
    /// An empty list means `none`.
    #[must_use]
    pub fn text_decoration_line(&self, diag: &Diagnostics) -> Vec<TextDecorationLine> {
        self.computed(
            PropertyId::TextDecorationLine,
            diag,
            &|_| Vec::new(),
            &|_, raw| {
                raw.split_ascii_whitespace()
                    .map(str::parse::<TextDecorationLine>)
                    .filter(|line| !matches!(line, Ok(TextDecorationLine::None)))
                    .collect::<Result<Vec<_>, _>>()
                    .ok()
            },
        )
    }

    /// [§ 2.1 Case Transforms](https://www.w3.org/TR/css-text-3/#text-transform-property)
    #[must_use]
    pub fn text_transform(&self, diag: &Diagnostics) -> TextTransform {
        self.keyword(PropertyId::TextTransform, diag)
    }

    /// [§ 3 White Space and Wrapping](https://www.w3.org/TR/css-text-3/#white-space-property)
    #[must_use]
    pub fn white_space(&self, diag: &Diagnostics) -> WhiteSpace {
        self.keyword(PropertyId::WhiteSpace, diag)
    }

    /// [§ 4.2 Border Style](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    ///
    /// `property` should be one of the `border-*-style` or `outline-style` ids.
    #[must_use]
    pub fn border_style(&self, property: PropertyId, diag: &Diagnostics) -> BorderStyle {
        self.keyword(property, diag)
    }

    /// [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
    ///
    /// Resolve any colour-valued property. `currentcolor` refers to this
    /// element's `color`, or to the parent's when used on `color` itself.
    #[must_use]
    pub fn color(&self, property: PropertyId, diag: &Diagnostics) -> Color {
        let current = |node: &Self| {
            if property == PropertyId::Color {
                node.parent()
                    .map_or(Color::BLACK, |p| p.color(PropertyId::Color, diag))
            } else {
                node.color(PropertyId::Color, diag)
            }
        };
        let parse = |node: &Self, raw: &str| {
            if raw.eq_ignore_ascii_case("currentcolor") {
                Some(current(node))
            } else {
                Color::parse(raw)
            }
        };
        let initial = |node: &Self| parse(node, property.initial_value()).unwrap_or(Color::BLACK);
        self.computed(property, diag, &initial, &parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dom_with_child() -> (DomTree, NodeId, NodeId) {
        let mut dom = DomTree::new();
        let root = dom.append_element(NodeId::ROOT, ElementData::new("div"));
        let child = dom.append_element(root, ElementData::new("span"));
        (dom, root, child)
    }

    #[test]
    fn test_from_dom_mirrors_structure_and_skips_comments() {
        let mut dom = DomTree::new();
        let root = dom.append_element(NodeId::ROOT, ElementData::new("div"));
        let _ = dom.append_text(root, "a");
        let comment = dom.alloc(NodeType::Comment("x".to_string()));
        dom.append_child(root, comment);
        let _ = dom.append_element(root, ElementData::new("p"));

        let tree = StyledTree::from_dom(&dom, root).expect("root exists");
        assert_eq!(tree.len(), 3);
        let children: Vec<_> = tree.root().children().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].text(), Some("a"));
        assert!(children[1].element().is_some_and(|e| e.is("p")));
        assert_eq!(children[1].parent(), Some(tree.root()));
    }

    #[test]
    fn test_set_property_replaces_previous_value() {
        let (dom, root, _) = dom_with_child();
        let mut tree = StyledTree::new(&dom, root).expect("root exists");
        let id = tree.root().id();
        tree.set_property(id, PropertyId::Width, "10px").expect("valid id");
        tree.set_declaration(id, "width", "20px").expect("valid id");
        assert_eq!(tree.root().declared(PropertyId::Width), Some("20px"));
        assert_eq!(
            tree.set_declaration(id, "grid-area", "a"),
            Err(StyleTreeError::UnknownProperty("grid-area".to_string()))
        );
        assert_eq!(
            tree.set_custom_property(id, "gap", "1px"),
            Err(StyleTreeError::InvalidCustomPropertyName("gap".to_string()))
        );
    }

    #[test]
    fn test_inherited_and_non_inherited_defaults() {
        let (dom, root, child) = dom_with_child();
        let mut tree = StyledTree::new(&dom, root).expect("root exists");
        let root_id = tree.root().id();
        let child_id = tree.append_child(root_id, child).expect("valid ids");
        tree.set_property(root_id, PropertyId::FontSize, "10px").expect("valid id");
        tree.set_property(root_id, PropertyId::Display, "block").expect("valid id");

        let diag = Diagnostics::new();
        let child = tree.node(child_id).expect("exists");
        assert_eq!(child.font_size(&diag), 10.0);
        assert_eq!(child.display(&diag), Display::Inline);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_css_wide_keywords() {
        let (dom, root, child) = dom_with_child();
        let mut tree = StyledTree::new(&dom, root).expect("root exists");
        let root_id = tree.root().id();
        let child_id = tree.append_child(root_id, child).expect("valid ids");
        tree.set_property(root_id, PropertyId::Display, "block").expect("valid id");
        tree.set_property(root_id, PropertyId::FontSize, "10px").expect("valid id");
        tree.set_property(child_id, PropertyId::Display, "inherit").expect("valid id");
        tree.set_property(child_id, PropertyId::FontSize, "initial").expect("valid id");

        let diag = Diagnostics::new();
        let child = tree.node(child_id).expect("exists");
        assert_eq!(child.display(&diag), Display::Block);
        assert_eq!(child.font_size(&diag), DEFAULT_FONT_SIZE_PX);
    }

    #[test]
    fn test_var_substitution_and_failure() {
        let (dom, root, child) = dom_with_child();
        let mut tree = StyledTree::new(&dom, root).expect("root exists");
        let root_id = tree.root().id();
        let child_id = tree.append_child(root_id, child).expect("valid ids");
        tree.set_custom_property(root_id, "--size", "12px").expect("valid");
        tree.set_property(child_id, PropertyId::FontSize, "var(--size)").expect("valid id");
        tree.set_property(child_id, PropertyId::Width, "var(--nope)").expect("valid id");

        let diag = Diagnostics::new();
        let child = tree.node(child_id).expect("exists");
        assert_eq!(child.font_size(&diag), 12.0);
        assert_eq!(child.get_raw_property(PropertyId::Width, &diag), "auto");
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_unparsable_keyword_warns_and_falls_back() {
        let (dom, root, _) = dom_with_child();
        let mut tree = StyledTree::new(&dom, root).expect("root exists");
        let id = tree.root().id();
        tree.set_property(id, PropertyId::TextTransform, "sideways").expect("valid id");
        let diag = Diagnostics::new();
        assert_eq!(tree.root().text_transform(&diag), TextTransform::None);
        assert_eq!(
            diag.into_warnings(),
            vec![Warning::UnknownKeyword {
                property: "text-transform".to_string(),
                value: "sideways".to_string(),
            }]
        );
    }
}
