use std::collections::HashSet;

use crate::editing::block::{Block, BlockId, BlockType, BlockUpdate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("duplicate block id in seed content: {0}")]
    DuplicateId(BlockId),
}

/// Why a structural removal was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RemoveError {
    NotFound,
    LastBlock,
}

/// Ordered, never-empty sequence of blocks making up one page.
///
/// The document only exposes read access publicly; all mutation goes through
/// [`crate::editing::Editor::apply`] so that read-only mode and focus
/// tracking are enforced in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Document holding a single empty paragraph
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::with_id("1", BlockType::Paragraph)],
        }
    }

    /// Seed a document from externally supplied blocks.
    ///
    /// An empty seed yields a single empty paragraph. Later blocks reusing an
    /// earlier id are given a fresh one so ids stay unique.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::new();
        }

        let mut seen = HashSet::with_capacity(blocks.len());
        let blocks = blocks
            .into_iter()
            .map(|mut block| {
                if !seen.insert(block.id.clone()) {
                    let fresh = BlockId::generate();
                    log::warn!("duplicate block id {} reassigned to {fresh}", block.id);
                    block.id = fresh.clone();
                    seen.insert(fresh);
                }
                block
            })
            .collect();

        Self { blocks }
    }

    /// Seed a document, rejecting content with duplicate block ids
    pub fn try_from_blocks(blocks: Vec<Block>) -> Result<Self, DocumentError> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(&block.id) {
                return Err(DocumentError::DuplicateId(block.id.clone()));
            }
        }
        Ok(Self::from_blocks(blocks))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.find(id).is_some()
    }

    /// Insert `block` right after `index`, appending when `index` is past the end.
    /// Returns the position the block landed at.
    pub(crate) fn insert_after(&mut self, index: usize, block: Block) -> usize {
        let at = index.saturating_add(1).min(self.blocks.len());
        self.blocks.insert(at, block);
        at
    }

    /// Merge `update` into the block with `id`; false when no block matches
    pub(crate) fn update(&mut self, id: &BlockId, update: BlockUpdate) -> bool {
        match self.blocks.iter_mut().find(|block| &block.id == id) {
            Some(block) => {
                block.merge(update);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &BlockId) -> Result<Block, RemoveError> {
        let index = self.position(id).ok_or(RemoveError::NotFound)?;
        if self.blocks.len() <= 1 {
            return Err(RemoveError::LastBlock);
        }
        Ok(self.blocks.remove(index))
    }

    /// Fresh id not present in this document
    pub(crate) fn fresh_id(&self) -> BlockId {
        loop {
            let id = BlockId::generate();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::block::{BlockKind, HeadingLevel};
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        Document::from_blocks(vec![
            Block::heading("1", HeadingLevel::H1, "Title"),
            Block::paragraph("2", "Body"),
            Block::todo("3", false, "Task"),
        ])
    }

    #[test]
    fn test_empty_seed_yields_single_paragraph() {
        let doc = Document::from_blocks(Vec::new());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks()[0].content, "");
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let doc = Document::from_blocks(vec![
            Block::paragraph("1", "a"),
            Block::paragraph("1", "b"),
        ]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks()[0].id, BlockId::from("1"));
        assert_ne!(doc.blocks()[1].id, BlockId::from("1"));
        assert_eq!(doc.blocks()[1].content, "b");
    }

    #[test]
    fn test_try_from_blocks_rejects_duplicates() {
        let result = Document::try_from_blocks(vec![
            Block::paragraph("7", "a"),
            Block::paragraph("7", "b"),
        ]);
        assert_eq!(result, Err(DocumentError::DuplicateId(BlockId::from("7"))));
    }

    #[test]
    fn test_insert_after_past_end_appends() {
        let mut doc = sample();
        let at = doc.insert_after(42, Block::paragraph("9", ""));
        assert_eq!(at, 3);
        assert_eq!(doc.blocks()[3].id, BlockId::from("9"));
    }

    #[test]
    fn test_remove_guards() {
        let mut doc = sample();
        assert_eq!(doc.remove(&BlockId::from("x")), Err(RemoveError::NotFound));
        assert!(doc.remove(&BlockId::from("1")).is_ok());
        assert!(doc.remove(&BlockId::from("2")).is_ok());
        assert_eq!(doc.remove(&BlockId::from("3")), Err(RemoveError::LastBlock));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(!doc.update(&BlockId::from("nope"), BlockUpdate::content("x")));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_fresh_id_not_in_document() {
        let doc = sample();
        assert!(!doc.contains(&doc.fresh_id()));
    }
}
