//! The ordered block sequence being edited.

use crate::{Block, BlockKind, ModelError, ModelResult};
use blockpage_types::BlockId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// An ordered sequence of blocks with unique ids.
///
/// Order is render/edit order. The only mutators are the invariant-preserving
/// primitives below; there is no access to the underlying `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Page {
    blocks: Vec<Block>,
}

impl Page {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a page from blocks, rejecting duplicate ids.
    pub fn from_blocks(blocks: Vec<Block>) -> ModelResult<Self> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(&block.id) {
                return Err(ModelError::DuplicateBlockId(block.id.clone()));
            }
        }
        Ok(Self { blocks })
    }

    /// Builds a page from blocks read out of a content store.
    ///
    /// Stored data is not trusted to be id-unique: every block after the first
    /// carrying a given id gets a fresh one. Content and order are kept.
    pub fn from_remote(blocks: Vec<Block>) -> Self {
        let mut page = Self {
            blocks: Vec::with_capacity(blocks.len()),
        };
        let mut seen = HashSet::with_capacity(blocks.len());
        for mut block in blocks {
            if !seen.insert(block.id.clone()) {
                let fresh = fresh_id_excluding(&seen);
                warn!("Duplicate block id {} in stored page, reassigned to {}", block.id, fresh);
                seen.insert(fresh.clone());
                block.id = fresh;
            }
            page.blocks.push(block);
        }
        page
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the page has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterates blocks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.iter().map(|b| &b.id)
    }

    /// Looks up a block by id.
    #[must_use]
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Position of the block with `id`.
    #[must_use]
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Whether a block with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    /// Returns an id no block in this page carries.
    #[must_use]
    pub fn fresh_id(&self) -> BlockId {
        loop {
            let id = BlockId::new();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Appends a block. Fails if its id is already present.
    pub fn push(&mut self, block: Block) -> ModelResult<()> {
        if self.contains(&block.id) {
            return Err(ModelError::DuplicateBlockId(block.id));
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Appends a block under a fresh id and returns that id.
    pub fn append_new(&mut self, kind: BlockKind, content: impl Into<String>) -> BlockId {
        let id = self.fresh_id();
        self.blocks.push(Block::with_id(id.clone(), kind, content));
        id
    }

    /// Replaces the content of the block with `id`.
    ///
    /// Returns `false`, leaving the page untouched, when no block matches.
    pub fn set_content(&mut self, id: &BlockId, content: impl Into<String>) -> bool {
        match self.blocks.iter_mut().find(|b| &b.id == id) {
            Some(block) => {
                block.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Moves the block at `from` so it ends up at `to`.
    ///
    /// Splice semantics: the block is removed first and `to` indexes the
    /// shortened sequence. `from == to` is a no-op. `from` must be in
    /// `[0, len)`; a `to` at or past the end clamps to the last position.
    pub fn move_block(&mut self, from: usize, to: usize) -> ModelResult<()> {
        let len = self.blocks.len();
        if from >= len {
            return Err(ModelError::IndexOutOfRange { index: from, len });
        }
        if from == to {
            return Ok(());
        }
        let block = self.blocks.remove(from);
        let to = to.min(self.blocks.len());
        self.blocks.insert(to, block);
        Ok(())
    }

    /// Removes the block with `id`, returning it.
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.position(id)?;
        Some(self.blocks.remove(index))
    }

    /// Consumes the page, returning its blocks.
    #[must_use]
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

fn fresh_id_excluding(taken: &HashSet<BlockId>) -> BlockId {
    loop {
        let id = BlockId::new();
        if !taken.contains(&id) {
            return id;
        }
    }
}

impl TryFrom<Vec<Block>> for Page {
    type Error = ModelError;

    fn try_from(blocks: Vec<Block>) -> ModelResult<Self> {
        Self::from_blocks(blocks)
    }
}

impl From<Page> for Vec<Block> {
    fn from(page: Page) -> Self {
        page.blocks
    }
}

impl<'a> IntoIterator for &'a Page {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
