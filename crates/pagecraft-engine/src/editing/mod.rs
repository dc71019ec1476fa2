/*!
 * # Editing Core
 *
 * A page is an ordered, never-empty sequence of typed [`Block`]s held by a
 * [`Document`]. The [`Editor`] wraps the document together with the
 * transient state a front-end needs: the focused block and the read-only
 * flag.
 *
 * ## Architecture
 *
 * - **Command-based editing**: every structural edit is a [`Cmd`] applied
 *   through [`Editor::apply`], or functionally through [`reduce`].
 * - **Explicit focus**: each [`Patch`] carries the block that should hold
 *   input focus; the model never touches UI focus itself.
 * - **Permissive failure**: unknown ids, out-of-range indexes and the
 *   delete-last-block guard are silent no-ops, reported only through
 *   [`Outcome::Ignored`].
 * - **Read API**: [`Snapshot`]s describe what to render without exposing
 *   the document for mutation.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use pagecraft_engine::editing::*;
 *
 * let mut editor = Editor::new(vec![Block::paragraph("1", "Hello")]);
 *
 * let patch = editor.apply(Cmd::InsertBlockAfter { index: 0, block_type: BlockType::Todo });
 * let new_id = patch.active_block.clone().unwrap();
 * editor.apply(Cmd::UpdateBlock { id: new_id, update: BlockUpdate::content("Write docs") });
 *
 * let snapshot = editor.snapshot();
 * assert_eq!(snapshot.blocks.len(), 2);
 * ```
 */

pub mod block;
pub mod commands;
pub mod document;
pub mod editor;
pub mod patch;
pub mod snapshot;

pub use block::{Block, BlockId, BlockKind, BlockType, BlockUpdate, HeadingLevel};
pub use commands::Cmd;
pub use document::{Document, DocumentError};
pub use editor::{Editor, reduce};
pub use patch::{IgnoreReason, Outcome, Patch};
pub use snapshot::{ImageSource, RenderBlock, RenderKind, Snapshot};
