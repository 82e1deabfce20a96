use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Block kind names understood by the engine.
///
/// `Element::kind` stays an open string, so kinds outside this list are
/// carried through edits untouched.
pub mod block_kind {
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING: &str = "heading";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const LIST_ITEM: &str = "list-item";
    pub const BULLETED_LIST: &str = "bulleted-list";
    pub const NUMBERED_LIST: &str = "numbered-list";
}

/// Boolean formatting marks a leaf can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Code];

    pub fn name(self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
        }
    }
}

/// Numbering style of a list block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Ordered,
    Unordered,
}

impl ListType {
    /// List type implied by a block kind, if the kind is a list at all
    pub fn for_kind(kind: &str) -> Option<Self> {
        match kind {
            block_kind::BULLETED_LIST => Some(ListType::Unordered),
            block_kind::NUMBERED_LIST => Some(ListType::Ordered),
            _ => None,
        }
    }
}

/// Text-bearing node. Leaves have no children and no identity beyond their path.
///
/// Marks the engine does not know about (say `strikethrough`) land in
/// `extra` and are written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Leaf {
    /// Unformatted leaf
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper setting a mark to `true`
    pub fn with(mut self, mark: Mark) -> Self {
        *self.mark_slot_mut(mark) = Some(true);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Raw mark value; `None` when the mark was never set
    pub fn mark(&self, mark: Mark) -> Option<bool> {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Code => self.code,
        }
    }

    /// Effective mark value, absent counts as off
    pub fn is_marked(&self, mark: Mark) -> bool {
        self.mark(mark).unwrap_or(false)
    }

    pub(crate) fn mark_slot_mut(&mut self, mark: Mark) -> &mut Option<bool> {
        match mark {
            Mark::Bold => &mut self.bold,
            Mark::Italic => &mut self.italic,
            Mark::Underline => &mut self.underline,
            Mark::Code => &mut self.code,
        }
    }

    /// Length of the text in UTF-16 code units, the unit `Point::offset` counts in
    pub fn utf16_len(&self) -> usize {
        self.text.encode_utf16().count()
    }
}

/// Container node with a kind tag and ordered children.
///
/// Attributes other than the ones below (a link's `url`, for one) are kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub children: Vec<Node>,
    /// Only meaningful for headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Only meaningful for list kinds
    #[serde(
        default,
        rename = "listType",
        skip_serializing_if = "Option::is_none"
    )]
    pub list_type: Option<ListType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Element {
    pub fn new(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            children,
            level: None,
            list_type: None,
            extra: Map::new(),
        }
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Self {
            level: Some(level),
            ..Self::new(block_kind::HEADING, children)
        }
    }

    /// Leaves of this element in document order, descending into nested elements
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// Concatenated text of every leaf below this element
    pub fn text(&self) -> String {
        self.leaves().iter().map(|leaf| leaf.text.as_str()).collect()
    }
}

fn collect_leaves<'a>(element: &'a Element, out: &mut Vec<&'a Leaf>) {
    for child in &element.children {
        match child {
            Node::Element(inner) => collect_leaves(inner, out),
            Node::Leaf(leaf) => out.push(leaf),
        }
    }
}

/// A node is exactly one of Element or Leaf.
///
/// On the wire this is untagged: `type` + `children` marks an element,
/// `text` marks a leaf. Nodes are reference counted so document versions
/// share every subtree an edit did not touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Arc<Element>),
    Leaf(Arc<Leaf>),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf.as_ref()),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element.as_ref()),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Element(element) => NodeRef::Element(element),
            Node::Leaf(leaf) => NodeRef::Leaf(leaf),
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(Arc::new(leaf))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(Arc::new(element))
    }
}

/// Borrowed view of a resolved node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Element(&'a Element),
    Leaf(&'a Leaf),
}

impl<'a> NodeRef<'a> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeRef::Element(_))
    }

    pub fn as_leaf(&self) -> Option<&'a Leaf> {
        match *self {
            NodeRef::Leaf(leaf) => Some(leaf),
            NodeRef::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match *self {
            NodeRef::Element(element) => Some(element),
            NodeRef::Leaf(_) => None,
        }
    }
}
