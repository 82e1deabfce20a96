use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::editing::patch::{EditError, Patch};
use crate::models::{Document, ListType, Path, block_kind};

/// Extra attributes for `set_block`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAttrs {
    /// Heading level, only read when the new kind is `heading`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl BlockAttrs {
    pub fn level(level: u8) -> Self {
        Self { level: Some(level) }
    }
}

/// Change the kind of the top-level block containing `path`.
///
/// Only `path[0]` is used. Kind-specific fields are rewritten so the block
/// never keeps stale ones: `level` survives only on headings, `listType`
/// only on list kinds. Switching to `heading` without a level keeps
/// whatever level the block already had.
pub fn set_block(doc: &Document, path: &[usize], kind: &str, attrs: BlockAttrs) -> Document {
    set_block_patch(doc, path, kind, attrs).document
}

pub(crate) fn set_block_patch(
    doc: &Document,
    path: &[usize],
    kind: &str,
    attrs: BlockAttrs,
) -> Patch {
    let Some(&index) = path.first() else {
        return Patch::skipped(doc, EditError::PathNotFound(Path::default()));
    };
    if doc.block(index).is_none() {
        return Patch::skipped(doc, EditError::PathNotFound(Path::from([index])));
    }

    let mut next = doc.clone();
    if let Some(block) = next.blocks_mut().get_mut(index) {
        let block = Arc::make_mut(block);
        block.kind = kind.to_string();
        if kind == block_kind::HEADING {
            if let Some(level) = attrs.level {
                block.level = Some(level);
            }
        } else {
            block.level = None;
        }
        block.list_type = ListType::for_kind(kind);
    }
    Patch::applied(next)
}
