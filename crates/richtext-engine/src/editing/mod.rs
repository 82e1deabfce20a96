/*!
 * # Editing Core Module
 *
 * Pure functions from `(document, target, args)` to a new document, plus
 * the history and session types a host UI builds on.
 *
 * ## Architecture Overview
 *
 * ### 1. Documents are values
 * - Every edit takes `&Document` and returns a new `Document`
 * - Nodes are `Arc`-shared; an edit clones only the nodes on the edited path
 * - The input document is never modified, so old versions stay valid as
 *   undo snapshots for free
 *
 * ### 2. Silent no-ops on bad input
 * - Unresolvable paths, cross-node ranges and non-leaf targets return the
 *   input document unchanged
 * - The same edits are available as `Cmd`s; `apply` returns a `Patch` whose
 *   `status` says why an edit was skipped
 *
 * ### 3. Same-leaf ranges only
 * - `delete_text`, `toggle_mark` and `set_color` act inside one leaf
 * - Ranges spanning several leaves are reported as `CrossNodeRange`
 *
 * ### 4. Caller-driven history
 * - `undo`/`redo` move whole-document snapshots between two stacks
 * - Which edits take a snapshot is a `HistoryPolicy`, not a hard-coded rule
 *
 * ## Module Structure
 *
 * - **`resolve`**: path lookup and path-copying mutable access
 * - **`text`**: insert, delete and split inside a leaf
 * - **`marks`**: bold/italic/underline/code toggles and color
 * - **`blocks`**: block kind changes
 * - **`commands`**: `Cmd` enum and the `apply` dispatcher
 * - **`patch`**: edit result with diagnostic status
 * - **`history`**: undo/redo stacks and recording policy
 * - **`editor`**: stateful session tying selection, history and edits together
 *
 * ## Usage Pattern
 *
 * ```rust
 * use richtext_engine::editing::*;
 * use richtext_engine::models::*;
 *
 * let doc = create_document();
 * let doc = insert_text(&doc, &Point::new([0, 0], 0), "Hello");
 * let doc = toggle_mark(&doc, &Range::collapsed(Point::new([0, 0], 0)), Mark::Bold);
 * let heading = set_block(&doc, &[0], block_kind::HEADING, BlockAttrs::level(2));
 *
 * let step = undo(&[doc.clone()], &[], &heading);
 * assert_eq!(step.value, doc);
 * assert_eq!(step.redos, vec![heading]);
 * ```
 */

pub mod blocks;
pub mod commands;
pub mod editor;
pub mod history;
pub mod marks;
pub mod patch;
pub mod resolve;
pub mod text;

// Public API re-exports
pub use blocks::{BlockAttrs, set_block};
pub use commands::{Cmd, apply};
pub use editor::{DEFAULT_HEADING_LEVEL, Editor};
pub use history::{EditKind, History, HistoryPolicy, HistoryStep, redo, undo};
pub use marks::{set_color, toggle_mark};
pub use patch::{EditError, Patch};
pub use resolve::{
    element_at_path, leaf_at_path, leaf_paths, node_at_path, text_at_path, utf16_to_byte,
};
pub use text::{delete_text, insert_text, split_node};
