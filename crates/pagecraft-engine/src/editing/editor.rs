use crate::editing::block::{Block, BlockId, BlockType, BlockUpdate};
use crate::editing::commands::Cmd;
use crate::editing::document::{Document, RemoveError};
use crate::editing::patch::{IgnoreReason, Outcome, Patch};
use crate::editing::snapshot::Snapshot;

/// Block editor state: the document plus transient focus and mode.
///
/// The editor owns its document exclusively. Every mutation is expressed as
/// a [`Cmd`] and applied synchronously through [`Editor::apply`], which
/// returns a [`Patch`] naming the block that should hold input focus next.
/// Focus/scroll mechanics are left to the presentation layer.
///
/// ```rust
/// use pagecraft_engine::editing::{Block, Cmd, Editor};
///
/// let mut editor = Editor::new(vec![Block::paragraph("1", "")]);
/// let patch = editor.apply(Cmd::EnterKey { index: 0 });
///
/// assert_eq!(editor.document().len(), 2);
/// assert_eq!(patch.active_block.as_ref(), Some(&editor.document().blocks()[1].id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    document: Document,
    active_block: Option<BlockId>,
    read_only: bool,
    version: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::from_document(Document::new())
    }
}

impl Editor {
    /// Interactive editor seeded with `blocks`
    pub fn new(blocks: Vec<Block>) -> Self {
        Self::from_document(Document::from_blocks(blocks))
    }

    /// Display-only editor; every command is ignored
    pub fn read_only(blocks: Vec<Block>) -> Self {
        Self::new(blocks).with_read_only(true)
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            active_block: None,
            read_only: false,
            version: 0,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        if read_only {
            self.active_block = None;
        }
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn active_block(&self) -> Option<&BlockId> {
        self.active_block.as_ref()
    }

    /// Position of the focused block in the document
    pub fn active_index(&self) -> Option<usize> {
        self.active_block
            .as_ref()
            .and_then(|id| self.document.position(id))
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Incremented on every applied command
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_editor(self)
    }

    /// Apply a command to the editor (core edit loop)
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let name = cmd.name();

        let outcome = if self.read_only {
            Outcome::Ignored(IgnoreReason::ReadOnly)
        } else {
            match cmd {
                Cmd::InsertBlockAfter { index, block_type } => {
                    self.insert_block_after(index, block_type)
                }
                Cmd::UpdateBlock { id, update } => self.update_block(&id, update),
                Cmd::DeleteBlock { id } => self.delete_block(&id),
                Cmd::EnterKey { index } => self.insert_block_after(index, BlockType::Paragraph),
                Cmd::BackspaceOnEmpty { index } => self.backspace_on_empty(index),
                Cmd::SetActiveBlock(id) => self.set_active_block(id),
            }
        };

        match outcome {
            Outcome::Applied => {
                self.version += 1;
                log::debug!("{name} applied, version {}", self.version);
            }
            Outcome::Ignored(reason) => {
                log::debug!("{name} ignored: {reason:?}");
            }
        }

        Patch {
            outcome,
            active_block: self.active_block.clone(),
            version: self.version,
        }
    }

    fn insert_block_after(&mut self, index: usize, block_type: BlockType) -> Outcome {
        let block = Block::with_id(self.document.fresh_id(), block_type);
        let id = block.id.clone();
        self.document.insert_after(index, block);
        self.active_block = Some(id);
        Outcome::Applied
    }

    fn update_block(&mut self, id: &BlockId, update: BlockUpdate) -> Outcome {
        if self.document.update(id, update) {
            Outcome::Applied
        } else {
            Outcome::Ignored(IgnoreReason::UnknownBlock)
        }
    }

    fn delete_block(&mut self, id: &BlockId) -> Outcome {
        match self.document.remove(id) {
            Ok(removed) => {
                if self.active_block.as_ref() == Some(&removed.id) {
                    self.active_block = None;
                }
                Outcome::Applied
            }
            Err(RemoveError::NotFound) => Outcome::Ignored(IgnoreReason::UnknownBlock),
            Err(RemoveError::LastBlock) => Outcome::Ignored(IgnoreReason::LastBlock),
        }
    }

    // Deletes the empty block and focuses its predecessor. The content is
    // not merged into the previous block.
    fn backspace_on_empty(&mut self, index: usize) -> Outcome {
        let Some(block) = self.document.get(index) else {
            return Outcome::Ignored(IgnoreReason::IndexOutOfRange);
        };
        if !block.content.is_empty() {
            return Outcome::Ignored(IgnoreReason::NotEmpty);
        }

        let id = block.id.clone();
        let outcome = self.delete_block(&id);
        if outcome == Outcome::Applied && index > 0 {
            self.active_block = self.document.get(index - 1).map(|prev| prev.id.clone());
        }
        outcome
    }

    fn set_active_block(&mut self, id: Option<BlockId>) -> Outcome {
        match id {
            Some(id) if !self.document.contains(&id) => {
                Outcome::Ignored(IgnoreReason::UnknownBlock)
            }
            id => {
                self.active_block = id;
                Outcome::Applied
            }
        }
    }
}

/// Pure reducer form of [`Editor::apply`]: leaves `editor` untouched and
/// returns the next state alongside the patch.
pub fn reduce(editor: &Editor, cmd: Cmd) -> (Editor, Patch) {
    let mut next = editor.clone();
    let patch = next.apply(cmd);
    (next, patch)
}
