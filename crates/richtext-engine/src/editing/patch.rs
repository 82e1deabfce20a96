use crate::models::{Document, Path};

/// Why an edit left the document unchanged
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no node at path [{0}]")]
    PathNotFound(Path),
    #[error("node at path [{0}] is not a text leaf")]
    NotALeaf(Path),
    #[error("range spans different nodes ([{anchor}] to [{focus}]); only same-leaf ranges are supported")]
    CrossNodeRange { anchor: Path, focus: Path },
    #[error("range is backward (anchor offset {anchor} after focus offset {focus})")]
    ReversedRange { anchor: usize, focus: usize },
    #[error("leaf at path [{0}] has no parent element")]
    NoParent(Path),
    #[error("no selection")]
    NoSelection,
    #[error("editor is read-only")]
    ReadOnly,
}

/// Result of applying a command
///
/// `document` is always usable: when `status` is an error it is the input
/// document unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub document: Document,
    pub status: Result<(), EditError>,
}

impl Patch {
    pub(crate) fn applied(document: Document) -> Self {
        Self {
            document,
            status: Ok(()),
        }
    }

    pub(crate) fn skipped(document: &Document, error: EditError) -> Self {
        log::debug!("edit skipped: {error}");
        Self {
            document: document.clone(),
            status: Err(error),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.status.is_ok()
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}
