use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::node::{Element, Leaf, Node, block_kind};

/// Ordered sequence of top-level blocks.
///
/// Documents are values: every edit returns a new `Document` and leaves its
/// input untouched. Blocks and their descendants are reference counted, so
/// cloning a document is cheap and a new version only owns fresh copies of
/// the nodes along the edited path.
///
/// ```rust
/// use richtext_engine::{Document, Point, insert_text, text_at_path};
///
/// let doc = Document::from_json(r#"[{"type":"paragraph","children":[{"text":"Hi"}]}]"#).unwrap();
/// let next = insert_text(&doc, &Point::new([0, 0], 2), "!");
///
/// assert_eq!(text_at_path(&next, &[0, 0]), "Hi!");
/// assert_eq!(text_at_path(&doc, &[0, 0]), "Hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Arc<Element>>,
}

impl Document {
    pub fn new(blocks: Vec<Element>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse the structural JSON form (an array of elements)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn blocks(&self) -> &[Arc<Element>] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Element> {
        self.blocks.get(index).map(|block| block.as_ref())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// A document needs at least one block before it can hold a cursor
    pub fn is_editable(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Whether both documents point at the very same block allocation.
    ///
    /// Used to observe structural sharing between versions.
    pub fn shares_block_with(&self, other: &Document, index: usize) -> bool {
        match (self.blocks.get(index), other.blocks.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Arc<Element>> {
        &mut self.blocks
    }
}

impl From<Vec<Element>> for Document {
    fn from(blocks: Vec<Element>) -> Self {
        Self::new(blocks)
    }
}

/// Empty paragraph holding a single empty leaf
pub fn create_paragraph() -> Element {
    Element::new(block_kind::PARAGRAPH, vec![Node::from(Leaf::new(""))])
}

/// Fresh editable document: one empty paragraph
pub fn create_document() -> Document {
    Document::new(vec![create_paragraph()])
}
