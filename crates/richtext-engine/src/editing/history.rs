//! Whole-document undo/redo.
//!
//! History is two stacks of document snapshots. The pure `undo`/`redo`
//! functions operate on caller-held stacks; `History` owns the stacks for
//! callers that want a session object. Neither decides *when* a snapshot is
//! taken: that is what `HistoryPolicy` is for.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::models::Document;

/// Category of edit, used to decide whether it records a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditKind {
    /// Inserting or deleting text
    Text,
    /// Toggling marks or setting color
    Mark,
    /// Changing a block's kind
    Block,
    /// Splitting nodes
    Structure,
}

impl EditKind {
    pub const ALL: [EditKind; 4] = [
        EditKind::Text,
        EditKind::Mark,
        EditKind::Block,
        EditKind::Structure,
    ];
}

/// Which edits push an undo snapshot, and how many snapshots to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPolicy {
    pub record: BTreeSet<EditKind>,
    /// Oldest snapshots are dropped beyond this many; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl HistoryPolicy {
    /// Only block kind changes are undoable
    pub fn blocks_only() -> Self {
        Self {
            record: BTreeSet::from([EditKind::Block]),
            max_depth: None,
        }
    }

    /// Every edit is undoable
    pub fn all() -> Self {
        Self {
            record: EditKind::ALL.into_iter().collect(),
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn records(&self, kind: EditKind) -> bool {
        self.record.contains(&kind)
    }
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self::blocks_only()
    }
}

/// Outcome of a pure `undo`/`redo` call
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStep {
    pub value: Document,
    pub undos: Vec<Document>,
    /// Most recently undone snapshot first
    pub redos: Vec<Document>,
}

/// Step back one snapshot. With no undos this returns `current` and both
/// stacks untouched.
pub fn undo(undos: &[Document], redos: &[Document], current: &Document) -> HistoryStep {
    let Some((previous, rest)) = undos.split_last() else {
        return HistoryStep {
            value: current.clone(),
            undos: undos.to_vec(),
            redos: redos.to_vec(),
        };
    };
    let mut next_redos = Vec::with_capacity(redos.len() + 1);
    next_redos.push(current.clone());
    next_redos.extend_from_slice(redos);

    HistoryStep {
        value: previous.clone(),
        undos: rest.to_vec(),
        redos: next_redos,
    }
}

/// Step forward to the front of `redos`. With no redos this returns
/// `current` and both stacks untouched.
pub fn redo(undos: &[Document], redos: &[Document], current: &Document) -> HistoryStep {
    let Some((next, rest)) = redos.split_first() else {
        return HistoryStep {
            value: current.clone(),
            undos: undos.to_vec(),
            redos: redos.to_vec(),
        };
    };
    let mut next_undos = undos.to_vec();
    next_undos.push(current.clone());

    HistoryStep {
        value: next.clone(),
        undos: next_undos,
        redos: rest.to_vec(),
    }
}

/// Owned undo/redo stacks
#[derive(Debug, Clone, Default)]
pub struct History {
    undos: Vec<Document>,
    redos: VecDeque<Document>,
    max_depth: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Push the state before an edit. A fresh edit invalidates the redo branch.
    pub fn record(&mut self, snapshot: Document) {
        self.undos.push(snapshot);
        self.redos.clear();
        if let Some(max) = self.max_depth
            && self.undos.len() > max
        {
            let excess = self.undos.len() - max;
            self.undos.drain(..excess);
        }
        log::trace!("history: recorded snapshot ({} undos)", self.undos.len());
    }

    /// Returns the restored document, or `None` when there is nothing to undo
    pub fn undo(&mut self, current: Document) -> Option<Document> {
        let previous = self.undos.pop()?;
        self.redos.push_front(current);
        log::trace!(
            "history: undo ({} undos, {} redos)",
            self.undos.len(),
            self.redos.len()
        );
        Some(previous)
    }

    /// Returns the restored document, or `None` when there is nothing to redo
    pub fn redo(&mut self, current: Document) -> Option<Document> {
        let next = self.redos.pop_front()?;
        self.undos.push(current);
        log::trace!(
            "history: redo ({} undos, {} redos)",
            self.undos.len(),
            self.redos.len()
        );
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    pub fn undos(&self) -> &[Document] {
        &self.undos
    }

    /// Redo snapshots, most recently undone first
    pub fn redos(&self) -> impl Iterator<Item = &Document> {
        self.redos.iter()
    }

    pub fn clear(&mut self) {
        self.undos.clear();
        self.redos.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{BlockAttrs, set_block};
    use crate::models::block_kind;
    use crate::tests::{hi_doc, text_doc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_undo_with_empty_stack_is_noop() {
        let current = hi_doc();
        let redos = vec![text_doc("later")];
        let step = undo(&[], &redos, &current);
        assert_eq!(step.value, current);
        assert!(step.undos.is_empty());
        assert_eq!(step.redos, redos);
    }

    #[test]
    fn test_redo_with_empty_stack_is_noop() {
        let current = hi_doc();
        let undos = vec![text_doc("earlier")];
        let step = redo(&undos, &[], &current);
        assert_eq!(step.value, current);
        assert_eq!(step.undos, undos);
        assert!(step.redos.is_empty());
    }

    #[test]
    fn test_undo_pops_last_and_pushes_front_of_redos() {
        let a = text_doc("a");
        let b = text_doc("b");
        let c = text_doc("c");
        let z = text_doc("z");

        let step = undo(&[a.clone(), b.clone()], &[z.clone()], &c);
        assert_eq!(step.value, b);
        assert_eq!(step.undos, vec![a]);
        assert_eq!(step.redos, vec![c, z]);
    }

    #[test]
    fn test_redo_takes_front_of_redos() {
        let a = text_doc("a");
        let b = text_doc("b");
        let c = text_doc("c");

        let step = redo(&[a.clone()], &[b.clone(), c.clone()], &text_doc("now"));
        assert_eq!(step.value, b);
        assert_eq!(step.undos, vec![a, text_doc("now")]);
        assert_eq!(step.redos, vec![c]);
    }

    #[test]
    fn test_undo_then_redo_restores_current() {
        let before = hi_doc();
        let after = set_block(&before, &[0], block_kind::HEADING, BlockAttrs::level(2));

        let undone = undo(&[before.clone()], &[], &after);
        assert_eq!(undone.value, before);

        let redone = redo(&undone.undos, &undone.redos, &undone.value);
        assert_eq!(redone.value, after);
        assert_eq!(redone.undos, vec![before]);
        assert!(redone.redos.is_empty());
    }

    #[test]
    fn test_owned_history_round_trip() {
        let mut history = History::new();
        let first = text_doc("first");
        let second = text_doc("second");

        history.record(first.clone());
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let restored = history.undo(second.clone()).unwrap();
        assert_eq!(restored, first);
        assert!(history.can_redo());

        let again = history.redo(restored).unwrap();
        assert_eq!(again, second);
        assert_eq!(history.undos(), &[first]);
        assert!(history.undo(text_doc("x")).is_some());
        assert!(history.undo(text_doc("y")).is_none());
    }

    #[test]
    fn test_record_clears_redo_branch() {
        let mut history = History::new();
        history.record(text_doc("a"));
        history.undo(text_doc("b"));
        assert!(history.can_redo());

        history.record(text_doc("c"));
        assert!(!history.can_redo());
        assert!(history.redo(text_doc("d")).is_none());
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let mut history = History::with_max_depth(Some(2));
        for text in ["a", "b", "c"] {
            history.record(text_doc(text));
        }
        assert_eq!(history.undos(), &[text_doc("b"), text_doc("c")]);
    }

    #[test]
    fn test_redos_list_most_recent_undo_first() {
        let mut history = History::new();
        history.record(text_doc("a"));
        history.record(text_doc("b"));

        let current = history.undo(text_doc("c")).unwrap();
        let current = history.undo(current).unwrap();
        assert_eq!(current, text_doc("a"));
        assert!(!history.can_undo());

        let redos: Vec<&Document> = history.redos().collect();
        assert_eq!(redos, vec![&text_doc("b"), &text_doc("c")]);

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.redos().count(), 0);
    }

    #[test]
    fn test_policy_defaults_to_block_changes() {
        let policy = HistoryPolicy::default();
        assert!(policy.records(EditKind::Block));
        assert!(!policy.records(EditKind::Text));
        assert!(!policy.records(EditKind::Mark));
        assert!(!policy.records(EditKind::Structure));
        assert!(EditKind::ALL.iter().all(|kind| HistoryPolicy::all().records(*kind)));
    }

    #[test]
    fn test_policy_wire_form() {
        let policy: HistoryPolicy =
            serde_json::from_str(r#"{"record":["text","structure"],"max_depth":50}"#).unwrap();
        assert!(policy.records(EditKind::Text));
        assert!(policy.records(EditKind::Structure));
        assert!(!policy.records(EditKind::Block));
        assert_eq!(policy.max_depth, Some(50));
    }
}
