//! Formatting marks on whole leaves.
//!
//! Marks apply to the entire leaf the range sits in; the range offsets are
//! ignored. Ranges covering more than one leaf are left alone.

use crate::editing::patch::{EditError, Patch};
use crate::editing::resolve::{leaf_mut, require_leaf};
use crate::models::{Document, Mark, Range};

/// Flip `mark` on the leaf under a same-leaf range. An unset mark counts as
/// off, so the first toggle stores `true` and the second stores `false`.
pub fn toggle_mark(doc: &Document, range: &Range, mark: Mark) -> Document {
    toggle_mark_patch(doc, range, mark).document
}

/// Set or clear the text color of the leaf under a same-leaf range
pub fn set_color(doc: &Document, range: &Range, color: Option<&str>) -> Document {
    set_color_patch(doc, range, color).document
}

fn check_target(doc: &Document, range: &Range) -> Result<(), EditError> {
    if !range.is_same_leaf() {
        return Err(EditError::CrossNodeRange {
            anchor: range.anchor.path.clone(),
            focus: range.focus.path.clone(),
        });
    }
    require_leaf(doc, &range.anchor.path).map(|_| ())
}

pub(crate) fn toggle_mark_patch(doc: &Document, range: &Range, mark: Mark) -> Patch {
    if let Err(error) = check_target(doc, range) {
        return Patch::skipped(doc, error);
    }

    let mut next = doc.clone();
    if let Some(leaf) = leaf_mut(&mut next, &range.anchor.path) {
        let slot = leaf.mark_slot_mut(mark);
        *slot = Some(!slot.unwrap_or(false));
    }
    Patch::applied(next)
}

pub(crate) fn set_color_patch(doc: &Document, range: &Range, color: Option<&str>) -> Patch {
    if let Err(error) = check_target(doc, range) {
        return Patch::skipped(doc, error);
    }

    let mut next = doc.clone();
    if let Some(leaf) = leaf_mut(&mut next, &range.anchor.path) {
        leaf.color = color.map(str::to_string);
    }
    Patch::applied(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::resolve::leaf_at_path;
    use crate::models::{Leaf, Point};
    use crate::tests::{doc_with_leaves, hi_doc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn caret() -> Range {
        Range::collapsed(Point::new([0, 0], 0))
    }

    #[test]
    fn test_toggle_bold_twice() {
        let once = toggle_mark(&hi_doc(), &caret(), Mark::Bold);
        assert_eq!(
            leaf_at_path(&once, &[0, 0]).unwrap(),
            &Leaf {
                bold: Some(true),
                ..Leaf::new("Hi")
            }
        );

        let twice = toggle_mark(&once, &caret(), Mark::Bold);
        assert_eq!(
            leaf_at_path(&twice, &[0, 0]).unwrap(),
            &Leaf {
                bold: Some(false),
                ..Leaf::new("Hi")
            }
        );
    }

    #[rstest]
    fn test_double_toggle_restores_mark_value(
        #[values(Mark::Bold, Mark::Italic, Mark::Underline, Mark::Code)] mark: Mark,
        #[values(None, Some(false), Some(true))] initial: Option<bool>,
    ) {
        let mut leaf = Leaf::new("text");
        *leaf.mark_slot_mut(mark) = initial;
        let doc = doc_with_leaves(vec![leaf]);

        let twice = toggle_mark(&toggle_mark(&doc, &caret(), mark), &caret(), mark);
        let before = leaf_at_path(&doc, &[0, 0]).unwrap();
        let after = leaf_at_path(&twice, &[0, 0]).unwrap();
        assert_eq!(after.is_marked(mark), before.is_marked(mark));
        assert_eq!(after.text, before.text);
    }

    #[test]
    fn test_toggle_ignores_offsets_within_leaf() {
        let doc = doc_with_leaves(vec![Leaf::new("Hello world")]);
        let next = toggle_mark(&doc, &Range::within([0, 0], 6, 11), Mark::Underline);
        let leaf = leaf_at_path(&next, &[0, 0]).unwrap();
        assert_eq!(leaf.text, "Hello world");
        assert!(leaf.is_marked(Mark::Underline));
    }

    #[test]
    fn test_toggle_only_touches_one_mark() {
        let doc = doc_with_leaves(vec![Leaf::new("x").with(Mark::Italic)]);
        let next = toggle_mark(&doc, &caret(), Mark::Code);
        let leaf = leaf_at_path(&next, &[0, 0]).unwrap();
        assert_eq!(leaf.italic, Some(true));
        assert_eq!(leaf.code, Some(true));
        assert_eq!(leaf.bold, None);
    }

    #[test]
    fn test_toggle_across_leaves_is_noop() {
        let doc = doc_with_leaves(vec![Leaf::new("a"), Leaf::new("b")]);
        let range = Range::new(Point::new([0, 0], 0), Point::new([0, 1], 1));
        let patch = toggle_mark_patch(&doc, &range, Mark::Bold);
        assert!(!patch.is_applied());
        assert_eq!(patch.document, doc);
    }

    #[test]
    fn test_toggle_on_block_is_noop() {
        let doc = hi_doc();
        let range = Range::collapsed(Point::new([0], 0));
        assert_eq!(toggle_mark(&doc, &range, Mark::Bold), doc);
    }

    #[test]
    fn test_set_and_clear_color() {
        let colored = set_color(&hi_doc(), &caret(), Some("#ff0000"));
        assert_eq!(
            leaf_at_path(&colored, &[0, 0]).unwrap().color.as_deref(),
            Some("#ff0000")
        );

        let cleared = set_color(&colored, &caret(), None);
        assert_eq!(cleared, hi_doc());
    }
}
