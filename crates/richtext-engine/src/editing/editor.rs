use crate::editing::commands::{Cmd, apply};
use crate::editing::history::{History, HistoryPolicy};
use crate::editing::patch::EditError;
use crate::editing::resolve::leaf_at_path;
use crate::editing::BlockAttrs;
use crate::models::{Document, Mark, Point, Range, block_kind, create_document};

pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Stateful editing session over a document value.
///
/// Holds what a host UI would otherwise keep next to the document: the
/// current selection, undo/redo stacks and the history policy. The
/// selection is always supplied by the host through `set_selection`.
#[derive(Debug, Clone)]
pub struct Editor {
    value: Document,
    selection: Option<Range>,
    history: History,
    policy: HistoryPolicy,
    read_only: bool,
    heading_level: u8,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(create_document())
    }
}

impl Editor {
    pub fn new(value: Document) -> Self {
        Self {
            value,
            selection: None,
            history: History::new(),
            policy: HistoryPolicy::default(),
            read_only: false,
            heading_level: DEFAULT_HEADING_LEVEL,
        }
    }

    pub fn with_policy(mut self, policy: HistoryPolicy) -> Self {
        self.history = History::with_max_depth(policy.max_depth);
        self.policy = policy;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Level given to blocks turned into headings via `set_block`
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level;
        self
    }

    pub fn value(&self) -> &Document {
        &self.value
    }

    pub fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn policy(&self) -> &HistoryPolicy {
        &self.policy
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Replace the document wholesale. Not recorded in history.
    pub fn set_value(&mut self, value: Document) {
        self.value = value;
    }

    pub fn set_selection(&mut self, selection: Option<Range>) {
        self.selection = selection;
    }

    /// Apply a command, recording an undo snapshot when the policy asks for
    /// this kind of edit. The selection follows inserted, deleted and split
    /// text.
    ///
    /// An edit that leaves the document as it was records nothing, so it
    /// cannot discard the redo branch.
    pub fn apply(&mut self, cmd: Cmd) -> Result<(), EditError> {
        if self.read_only {
            return Err(EditError::ReadOnly);
        }
        let patch = apply(&self.value, &cmd);
        patch.status?;
        if patch.document == self.value {
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.value, patch.document);
        if self.policy.records(cmd.kind()) {
            self.history.record(previous);
        }
        if let Some(selection) = self.selection.as_mut() {
            transform_point(&mut selection.anchor, &cmd);
            transform_point(&mut selection.focus, &cmd);
        }
        Ok(())
    }

    /// Type `text` at the caret, replacing an expanded same-leaf selection
    pub fn insert_text(&mut self, text: &str) -> Result<(), EditError> {
        let selection = self.require_selection()?;
        if !selection.is_collapsed() {
            self.delete_selection()?;
        }
        let (start, _) = self.require_selection()?.start_end();
        let at = start.clone();
        self.apply(Cmd::InsertText {
            at,
            text: text.to_string(),
        })
    }

    /// Delete the selected text. Direction of the selection does not matter.
    pub fn delete_selection(&mut self) -> Result<(), EditError> {
        let selection = self.require_selection()?;
        let (start, end) = selection.start_end();
        let range = Range::new(start.clone(), end.clone());
        self.apply(Cmd::DeleteText { range })
    }

    /// Backspace: delete the selection, or the character before the caret.
    /// At the start of a leaf this does nothing.
    pub fn delete_backward(&mut self) -> Result<(), EditError> {
        let selection = self.require_selection()?;
        if !selection.is_collapsed() {
            return self.delete_selection();
        }
        let caret = selection.focus.clone();
        let Some(leaf) = leaf_at_path(&self.value, &caret.path) else {
            return Err(EditError::NotALeaf(caret.path));
        };
        // A caret past the end of the text sits at the end
        let offset = caret.offset.min(leaf.utf16_len());
        let Some(width) = char_width_before(&leaf.text, offset) else {
            return Ok(());
        };
        if offset != caret.offset {
            self.selection = Some(Range::collapsed(Point::new(caret.path.clone(), offset)));
        }
        let range = Range::within(caret.path, offset - width, offset);
        self.apply(Cmd::DeleteText { range })
    }

    /// Split the leaf at the caret (start of an expanded selection)
    pub fn split(&mut self) -> Result<(), EditError> {
        let (at, _) = self.require_selection()?.start_end();
        let at = at.clone();
        self.apply(Cmd::SplitNode { at })
    }

    pub fn toggle_mark(&mut self, mark: Mark) -> Result<(), EditError> {
        let range = self.require_selection()?.clone();
        self.apply(Cmd::ToggleMark { range, mark })
    }

    pub fn set_color(&mut self, color: Option<&str>) -> Result<(), EditError> {
        let range = self.require_selection()?.clone();
        self.apply(Cmd::SetColor {
            range,
            color: color.map(str::to_string),
        })
    }

    /// Change the kind of the block holding the selection anchor
    pub fn set_block(&mut self, kind: &str) -> Result<(), EditError> {
        let path = self.require_selection()?.anchor.path.clone();
        let attrs = if kind == block_kind::HEADING {
            BlockAttrs::level(self.heading_level)
        } else {
            BlockAttrs::default()
        };
        self.apply(Cmd::SetBlock {
            path,
            kind: kind.to_string(),
            attrs,
        })
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.value.clone()) {
            Some(previous) => {
                self.value = previous;
                true
            }
            None => false,
        }
    }

    /// Returns false when there was nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.value.clone()) {
            Some(next) => {
                self.value = next;
                true
            }
            None => false,
        }
    }

    fn require_selection(&self) -> Result<&Range, EditError> {
        self.selection.as_ref().ok_or(EditError::NoSelection)
    }
}

/// UTF-16 width of the character ending at `offset`, `None` at the start
fn char_width_before(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    let mut previous = None;
    for ch in text.chars() {
        if units >= offset {
            break;
        }
        units += ch.len_utf16();
        previous = Some(ch.len_utf16());
    }
    previous
}

/// Keep a selection point on the same character after `cmd` was applied
fn transform_point(point: &mut Point, cmd: &Cmd) {
    match cmd {
        Cmd::InsertText { at, text } => {
            if point.path == at.path && point.offset >= at.offset {
                point.offset += text.encode_utf16().count();
            }
        }
        Cmd::DeleteText { range } => {
            let (start, end) = (range.anchor.offset, range.focus.offset);
            if point.path == range.anchor.path && point.offset > start {
                point.offset = if point.offset >= end {
                    point.offset - (end - start)
                } else {
                    start
                };
            }
        }
        Cmd::SplitNode { at } => {
            let (Some(parent), Some(index)) = (at.path.parent(), at.path.last()) else {
                return;
            };
            if point.path == at.path {
                if point.offset >= at.offset {
                    point.path = at.path.with_last(index + 1);
                    point.offset -= at.offset;
                }
                return;
            }
            // Later siblings, and anything nested under them, shift by one
            let depth = parent.len();
            if point.path.len() > depth
                && point.path[..depth] == parent[..]
                && point.path[depth] > index
            {
                let mut indices = point.path.clone().into_inner();
                indices[depth] += 1;
                point.path = indices.into();
            }
        }
        Cmd::ToggleMark { .. } | Cmd::SetColor { .. } | Cmd::SetBlock { .. } => {}
    }
}
