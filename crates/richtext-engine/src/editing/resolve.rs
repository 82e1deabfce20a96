//! Path resolution over a document tree.
//!
//! Resolution never panics: indices out of range, an empty path, or a path
//! that tries to descend through a leaf all resolve to `None`.

use std::sync::Arc;

use crate::editing::patch::EditError;
use crate::models::{Document, Element, Leaf, Node, NodeRef, Path};

/// Node at `path`, walking from the top-level blocks through `children`
pub fn node_at_path<'a>(doc: &'a Document, path: &[usize]) -> Option<NodeRef<'a>> {
    let (first, rest) = path.split_first()?;
    let mut node = NodeRef::Element(doc.block(*first)?);
    for &index in rest {
        node = match node {
            NodeRef::Element(element) => element.children.get(index)?.as_node_ref(),
            NodeRef::Leaf(_) => return None,
        };
    }
    Some(node)
}

pub fn leaf_at_path<'a>(doc: &'a Document, path: &[usize]) -> Option<&'a Leaf> {
    node_at_path(doc, path)?.as_leaf()
}

pub fn element_at_path<'a>(doc: &'a Document, path: &[usize]) -> Option<&'a Element> {
    node_at_path(doc, path)?.as_element()
}

/// Leaf text at `path`, or the empty string when there is no leaf there
pub fn text_at_path<'a>(doc: &'a Document, path: &[usize]) -> &'a str {
    leaf_at_path(doc, path).map_or("", |leaf| leaf.text.as_str())
}

/// Like `leaf_at_path` but says why resolution failed
pub(crate) fn require_leaf<'a>(doc: &'a Document, path: &Path) -> Result<&'a Leaf, EditError> {
    match node_at_path(doc, path) {
        Some(NodeRef::Leaf(leaf)) => Ok(leaf),
        Some(NodeRef::Element(_)) => Err(EditError::NotALeaf(path.clone())),
        None => Err(EditError::PathNotFound(path.clone())),
    }
}

/// Every leaf in document order together with its path
pub fn leaf_paths(doc: &Document) -> Vec<(Path, &Leaf)> {
    let mut out = Vec::new();
    for (index, block) in doc.blocks().iter().enumerate() {
        collect(block, Path::from([index]), &mut out);
    }
    out
}

fn collect<'a>(element: &'a Element, path: Path, out: &mut Vec<(Path, &'a Leaf)>) {
    for (index, child) in element.children.iter().enumerate() {
        match child {
            Node::Element(inner) => collect(inner, path.child(index), out),
            Node::Leaf(leaf) => out.push((path.child(index), leaf)),
        }
    }
}

/// Mutable element at `path`, cloning each shared node on the way down.
///
/// Only call after the path has been validated against the immutable tree,
/// otherwise nodes get unshared for nothing.
pub(crate) fn element_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Option<&'a mut Element> {
    let (first, rest) = path.split_first()?;
    let mut element = Arc::make_mut(doc.blocks_mut().get_mut(*first)?);
    for &index in rest {
        element = match element.children.get_mut(index)? {
            Node::Element(child) => Arc::make_mut(child),
            Node::Leaf(_) => return None,
        };
    }
    Some(element)
}

/// Mutable leaf at `path`, path-copying like `element_mut`
pub(crate) fn leaf_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Option<&'a mut Leaf> {
    let (last, parent) = path.split_last()?;
    match element_mut(doc, parent)?.children.get_mut(*last)? {
        Node::Leaf(leaf) => Some(Arc::make_mut(leaf)),
        Node::Element(_) => None,
    }
}

/// Byte index for a UTF-16 offset into `text`.
///
/// Offsets past the end clamp to the end. An offset that lands between the
/// two halves of a surrogate pair rounds down to the start of that character.
pub fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units + ch.len_utf16() > offset {
            return byte;
        }
        units += ch.len_utf16();
    }
    text.len()
}
