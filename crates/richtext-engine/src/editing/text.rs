//! Text edits inside a single leaf: insert, delete and split.

use std::sync::Arc;

use crate::editing::patch::{EditError, Patch};
use crate::editing::resolve::{element_mut, leaf_mut, require_leaf, utf16_to_byte};
use crate::models::{Document, Leaf, Node, Point, Range};

/// Splice `text` into the leaf at `at`. Offsets past the end append.
///
/// Returns `doc` unchanged when `at.path` does not resolve to a leaf.
pub fn insert_text(doc: &Document, at: &Point, text: &str) -> Document {
    insert_text_patch(doc, at, text).document
}

/// Remove the text between anchor and focus of a same-leaf range.
///
/// Cross-node ranges are not supported and return `doc` unchanged. A
/// backward range (anchor after focus) is reported as `ReversedRange`
/// rather than reinterpreted; callers wanting direction-free behaviour can
/// reorder with `Range::start_end` first.
pub fn delete_text(doc: &Document, range: &Range) -> Document {
    delete_text_patch(doc, range).document
}

/// Split the leaf at `at` in two. The text before the offset stays at the
/// same path with its marks; the rest moves into a new unmarked leaf right
/// after it.
pub fn split_node(doc: &Document, at: &Point) -> Document {
    split_node_patch(doc, at).document
}

pub(crate) fn insert_text_patch(doc: &Document, at: &Point, text: &str) -> Patch {
    if let Err(error) = require_leaf(doc, &at.path) {
        return Patch::skipped(doc, error);
    }
    if text.is_empty() {
        return Patch::applied(doc.clone());
    }

    let mut next = doc.clone();
    if let Some(leaf) = leaf_mut(&mut next, &at.path) {
        let byte = utf16_to_byte(&leaf.text, at.offset);
        leaf.text.insert_str(byte, text);
    }
    Patch::applied(next)
}

pub(crate) fn delete_text_patch(doc: &Document, range: &Range) -> Patch {
    if !range.is_same_leaf() {
        return Patch::skipped(
            doc,
            EditError::CrossNodeRange {
                anchor: range.anchor.path.clone(),
                focus: range.focus.path.clone(),
            },
        );
    }
    if range.is_backward() {
        return Patch::skipped(
            doc,
            EditError::ReversedRange {
                anchor: range.anchor.offset,
                focus: range.focus.offset,
            },
        );
    }
    let leaf = match require_leaf(doc, &range.anchor.path) {
        Ok(leaf) => leaf,
        Err(error) => return Patch::skipped(doc, error),
    };

    let start = utf16_to_byte(&leaf.text, range.anchor.offset);
    let end = utf16_to_byte(&leaf.text, range.focus.offset);
    if start == end {
        return Patch::applied(doc.clone());
    }

    let mut next = doc.clone();
    if let Some(leaf) = leaf_mut(&mut next, &range.anchor.path) {
        leaf.text.replace_range(start..end, "");
    }
    Patch::applied(next)
}

pub(crate) fn split_node_patch(doc: &Document, at: &Point) -> Patch {
    if let Err(error) = require_leaf(doc, &at.path) {
        return Patch::skipped(doc, error);
    }
    let (Some(parent), Some(index)) = (at.path.parent(), at.path.last()) else {
        return Patch::skipped(doc, EditError::NoParent(at.path.clone()));
    };

    let mut next = doc.clone();
    let Some(parent) = element_mut(&mut next, &parent) else {
        return Patch::skipped(doc, EditError::NoParent(at.path.clone()));
    };
    let after = match parent.children.get_mut(index) {
        Some(Node::Leaf(leaf)) => {
            let leaf = Arc::make_mut(leaf);
            let byte = utf16_to_byte(&leaf.text, at.offset);
            leaf.text.split_off(byte)
        }
        _ => return Patch::skipped(doc, EditError::NotALeaf(at.path.clone())),
    };
    parent.children.insert(index + 1, Node::from(Leaf::new(after)));
    Patch::applied(next)
}
