use crate::editing::block::{BlockId, BlockType, BlockUpdate};

/// Edit commands accepted by [`crate::editing::Editor::apply`].
///
/// Each command corresponds to one discrete user input event and runs to
/// completion before the next one is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Insert an empty block of `block_type` right after `index` and focus it
    InsertBlockAfter { index: usize, block_type: BlockType },
    /// Merge partial fields into the block with `id`, including retyping
    UpdateBlock { id: BlockId, update: BlockUpdate },
    /// Remove the block with `id` unless it is the last one
    DeleteBlock { id: BlockId },
    /// Enter without modifiers while editing the block at `index`
    EnterKey { index: usize },
    /// Backspace while the block at `index` is empty
    BackspaceOnEmpty { index: usize },
    /// Move input focus, or clear it with `None`
    SetActiveBlock(Option<BlockId>),
}

impl Cmd {
    pub fn update(id: impl Into<BlockId>, update: BlockUpdate) -> Self {
        Cmd::UpdateBlock {
            id: id.into(),
            update,
        }
    }

    pub fn delete(id: impl Into<BlockId>) -> Self {
        Cmd::DeleteBlock { id: id.into() }
    }

    pub fn focus(id: impl Into<BlockId>) -> Self {
        Cmd::SetActiveBlock(Some(id.into()))
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::InsertBlockAfter { .. } => "insert_block_after",
            Cmd::UpdateBlock { .. } => "update_block",
            Cmd::DeleteBlock { .. } => "delete_block",
            Cmd::EnterKey { .. } => "enter_key",
            Cmd::BackspaceOnEmpty { .. } => "backspace_on_empty",
            Cmd::SetActiveBlock(_) => "set_active_block",
        }
    }
}
