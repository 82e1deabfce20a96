use serde::{Deserialize, Serialize};

use crate::editing::blocks::{BlockAttrs, set_block_patch};
use crate::editing::history::EditKind;
use crate::editing::marks::{set_color_patch, toggle_mark_patch};
use crate::editing::patch::Patch;
use crate::editing::text::{delete_text_patch, insert_text_patch, split_node_patch};
use crate::models::{Document, Mark, Path, Point, Range};

/// Every document mutation the engine supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Cmd {
    InsertText {
        at: Point,
        text: String,
    },
    DeleteText {
        range: Range,
    },
    SplitNode {
        at: Point,
    },
    ToggleMark {
        range: Range,
        mark: Mark,
    },
    SetColor {
        range: Range,
        color: Option<String>,
    },
    SetBlock {
        path: Path,
        kind: String,
        #[serde(default)]
        attrs: BlockAttrs,
    },
}

impl Cmd {
    pub fn kind(&self) -> EditKind {
        match self {
            Cmd::InsertText { .. } | Cmd::DeleteText { .. } => EditKind::Text,
            Cmd::SplitNode { .. } => EditKind::Structure,
            Cmd::ToggleMark { .. } | Cmd::SetColor { .. } => EditKind::Mark,
            Cmd::SetBlock { .. } => EditKind::Block,
        }
    }
}

/// Apply a command, returning the new document and whether it took effect.
///
/// Never fails: unsupported or unresolvable targets yield the input
/// document with an `EditError` in `Patch::status`.
pub fn apply(doc: &Document, cmd: &Cmd) -> Patch {
    match cmd {
        Cmd::InsertText { at, text } => insert_text_patch(doc, at, text),
        Cmd::DeleteText { range } => delete_text_patch(doc, range),
        Cmd::SplitNode { at } => split_node_patch(doc, at),
        Cmd::ToggleMark { range, mark } => toggle_mark_patch(doc, range, *mark),
        Cmd::SetColor { range, color } => set_color_patch(doc, range, color.as_deref()),
        Cmd::SetBlock { path, kind, attrs } => set_block_patch(doc, path, kind, *attrs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::patch::EditError;
    use crate::editing::resolve::text_at_path;
    use crate::models::block_kind;
    use crate::tests::hi_doc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_dispatches_each_command() {
        let doc = hi_doc();
        let caret = Range::collapsed(Point::new([0, 0], 0));

        let inserted = apply(
            &doc,
            &Cmd::InsertText {
                at: Point::new([0, 0], 2),
                text: " there".to_string(),
            },
        );
        assert_eq!(text_at_path(&inserted.document, &[0, 0]), "Hi there");

        let deleted = apply(
            &inserted.document,
            &Cmd::DeleteText {
                range: Range::within([0, 0], 0, 3),
            },
        );
        assert_eq!(text_at_path(&deleted.document, &[0, 0]), "there");

        let split = apply(&doc, &Cmd::SplitNode { at: Point::new([0, 0], 1) });
        assert_eq!(split.document.block(0).unwrap().children.len(), 2);

        let marked = apply(
            &doc,
            &Cmd::ToggleMark {
                range: caret.clone(),
                mark: Mark::Code,
            },
        );
        assert!(marked.is_applied());

        let colored = apply(
            &doc,
            &Cmd::SetColor {
                range: caret,
                color: Some("blue".to_string()),
            },
        );
        assert!(colored.is_applied());

        let heading = apply(
            &doc,
            &Cmd::SetBlock {
                path: Path::from([0]),
                kind: block_kind::HEADING.to_string(),
                attrs: BlockAttrs::level(1),
            },
        );
        assert_eq!(heading.document.block(0).unwrap().level, Some(1));
    }

    #[test]
    fn test_apply_reports_skips() {
        let doc = hi_doc();
        let patch = apply(
            &doc,
            &Cmd::InsertText {
                at: Point::new([9, 9], 0),
                text: "x".to_string(),
            },
        );
        assert_eq!(patch.status, Err(EditError::PathNotFound(Path::from([9, 9]))));
        assert_eq!(patch.into_document(), doc);
    }

    #[test]
    fn test_command_kinds() {
        let caret = Range::collapsed(Point::default());
        assert_eq!(Cmd::DeleteText { range: caret.clone() }.kind(), EditKind::Text);
        assert_eq!(Cmd::SplitNode { at: Point::default() }.kind(), EditKind::Structure);
        assert_eq!(
            Cmd::SetColor {
                range: caret,
                color: None
            }
            .kind(),
            EditKind::Mark
        );
    }

    #[test]
    fn test_command_wire_form() {
        let cmd: Cmd = serde_json::from_str(
            r#"{"op":"toggle_mark","range":{"anchor":{"path":[0,0],"offset":0},"focus":{"path":[0,0],"offset":0}},"mark":"bold"}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Cmd::ToggleMark {
                range: Range::collapsed(Point::new([0, 0], 0)),
                mark: Mark::Bold,
            }
        );

        let cmd: Cmd =
            serde_json::from_str(r#"{"op":"set_block","path":[0],"kind":"blockquote"}"#).unwrap();
        assert_eq!(cmd.kind(), EditKind::Block);
    }
}
