//! JSON document descriptions.
//!
//! A document is a tree of element and text objects:
//!
//! ```json
//! {
//!   "tag": "div",
//!   "attrs": { "id": "main" },
//!   "style": { "display": "block", "width": "50%", "--gap": "4px" },
//!   "children": [ { "text": "hello" } ]
//! }
//! ```
//!
//! The root must be an element. Style declarations are applied as-is; no
//! selector matching or cascade happens.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;
use trellis_css::{StyleTreeError, StyledTree};
use trellis_dom::{DomTree, ElementData, NodeId};

/// Errors raised while loading a document description.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The input is not a valid document description.
    #[error("invalid document description")]
    Json(#[from] serde_json::Error),
    /// The top-level object is a text node.
    #[error("the document root must be an element, not text")]
    TextRoot,
    /// A style declaration was rejected by the styled tree.
    #[error("invalid style declaration")]
    Style(#[from] StyleTreeError),
}

/// One node of a document description.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NodeSpec {
    Text {
        text: String,
    },
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        style: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<NodeSpec>,
    },
}

/// A parsed document: the DOM plus the declarations to put on each element.
#[derive(Debug)]
pub struct Document {
    dom: DomTree,
    root: NodeId,
    declarations: Vec<(NodeId, Vec<(String, String)>)>,
}

impl Document {
    /// Read and parse a document description from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not describe a document.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Parse a document description from a JSON string.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or a text root.
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        let spec: NodeSpec = serde_json::from_str(source)?;
        if matches!(spec, NodeSpec::Text { .. }) {
            return Err(DocumentError::TextRoot);
        }

        let mut doc = Self {
            dom: DomTree::new(),
            root: NodeId::ROOT,
            declarations: Vec::new(),
        };
        let document = doc.dom.root();
        doc.root = doc.append(document, spec);
        Ok(doc)
    }

    fn append(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        match spec {
            NodeSpec::Text { text } => self.dom.append_text(parent, &text),
            NodeSpec::Element {
                tag,
                attrs,
                style,
                children,
            } => {
                let data = attrs
                    .iter()
                    .fold(ElementData::new(&tag), |data, (name, value)| {
                        data.with_attr(name, value)
                    });
                let id = self.dom.append_element(parent, data);
                if !style.is_empty() {
                    self.declarations.push((id, style.into_iter().collect()));
                }
                for child in children {
                    let _ = self.append(id, child);
                }
                id
            }
        }
    }

    /// The DOM built from the description.
    #[must_use]
    pub const fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// Build the styled tree for the root element and apply every
    /// declaration.
    ///
    /// # Errors
    ///
    /// Fails if a declaration names an unsupported property.
    pub fn styled_tree(&self) -> Result<StyledTree<'_>, DocumentError> {
        let mut tree = StyledTree::from_dom(&self.dom, self.root)?;
        for (node, declarations) in &self.declarations {
            let Some(id) = tree.find(*node) else {
                continue;
            };
            for (name, value) in declarations {
                tree.set_declaration(id, name, value)?;
            }
        }
        Ok(tree)
    }
}
