//! The block editor engine: page mutations plus derived session state.

use crate::error::EditorResult;
use crate::state::{Activity, SessionState};
use blockpage_model::{Block, BlockKind, Page};
use blockpage_types::BlockId;
use tracing::debug;

/// Success notice set when a delete is confirmed.
pub const DELETED_MESSAGE: &str = "Block deleted";

/// Owns the page being edited and the session state around it.
#[derive(Debug, Clone, Default)]
pub struct BlockEditor {
    page: Page,
    state: SessionState,
}

impl BlockEditor {
    /// Creates an editor over an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor over an existing page.
    pub fn with_page(page: Page) -> Self {
        Self {
            page,
            state: SessionState::default(),
        }
    }

    /// The page being edited.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    // ── Page operations ──────────────────────────────────────────

    /// Appends a new block and returns its id. Never fails.
    pub fn add_block(&mut self, kind: BlockKind, content: impl Into<String>) -> BlockId {
        let id = self.page.append_new(kind, content);
        debug!("Added {} block {}", kind, id);
        id
    }

    /// Appends a block of `kind` carrying that kind's default content.
    pub fn add_default_block(&mut self, kind: BlockKind) -> BlockId {
        self.add_block(kind, kind.default_content())
    }

    /// Replaces the content of the block with `id`.
    ///
    /// An unknown id leaves the page untouched and returns `false`; the block
    /// may have been deleted while the edit was in flight.
    pub fn set_block_content(&mut self, id: &BlockId, content: impl Into<String>) -> bool {
        let updated = self.page.set_content(id, content);
        if !updated {
            debug!("Ignoring content update for missing block {}", id);
        }
        updated
    }

    /// Moves the block at `from` to `to` (splice semantics, `to` clamps).
    pub fn move_block(&mut self, from: usize, to: usize) -> EditorResult<()> {
        self.page.move_block(from, to)?;
        debug!("Moved block {} -> {}", from, to);
        Ok(())
    }

    /// Replaces the whole page, e.g. after a load.
    ///
    /// A pending delete whose block is gone from the new page is dropped.
    pub fn replace_page(&mut self, page: Page) {
        self.page = page;
        if let Some(pending) = &self.state.pending_delete_id {
            if !self.page.contains(pending) {
                self.state.pending_delete_id = None;
            }
        }
    }

    // ── Delete confirmation ──────────────────────────────────────

    /// Marks `id` as awaiting delete confirmation. Does not touch the page.
    ///
    /// Returns `false` and changes nothing when no block has that id.
    pub fn request_delete(&mut self, id: &BlockId) -> bool {
        if !self.page.contains(id) {
            debug!("Delete requested for missing block {}", id);
            return false;
        }
        self.state.pending_delete_id = Some(id.clone());
        true
    }

    /// Deletes the pending block, if any, and returns it.
    ///
    /// With nothing pending this is a no-op.
    pub fn confirm_delete(&mut self) -> Option<Block> {
        let pending = self.state.pending_delete_id.take()?;
        let removed = self.page.remove(&pending);
        self.state.success = Some(DELETED_MESSAGE.to_string());
        debug!("Deleted block {}", pending);
        removed
    }

    /// Clears the pending delete without touching the page.
    pub fn cancel_delete(&mut self) {
        self.state.pending_delete_id = None;
    }

    // ── Notices & activity ───────────────────────────────────────

    /// Sets the failure notice.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state.error = Some(message.into());
    }

    /// Sets the confirmation notice.
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.state.success = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.state.success = None;
    }

    /// Records which remote request is in flight.
    pub fn set_activity(&mut self, activity: Activity) {
        self.state.activity = activity;
    }
}
