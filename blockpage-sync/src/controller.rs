//! Sync controller: the load/save state machine, without I/O.
//!
//! The controller owns the editor and decides what a load or save means for
//! it. Gateway calls are split in two: `begin_*` hands out a request carrying
//! a [`Ticket`], the caller performs the call, and `complete_*` applies the
//! result. A result whose ticket is not the outstanding one (the session was
//! reset, or the request was already answered) is discarded untouched.
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready ──save──▶ Syncing ──ok──▶ Ready
//!                   │                               │
//!                   └──err──▶ Error ◀──────err──────┘
//! ```

use crate::config::SyncConfig;
use crate::error::GatewayResult;
use crate::gateway::ContentGateway;
use blockpage_editor::{Activity, BlockEditor, SessionState};
use blockpage_model::{Entry, EntryList, EntryPatch, Page};
use blockpage_types::EntryUid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Error notice after a failed load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch content";
/// Error notice after a failed save.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to sync content";
/// Success notice after a save.
pub const SAVED_MESSAGE: &str = "Synced!";

/// Where the controller is in the load/save cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Syncing,
    Error,
}

/// Identifies one outstanding gateway request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    seq: u64,
}

/// A fetch the caller should perform.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: Ticket,
    pub content_type: String,
}

/// An update the caller should perform. `patch` is the page as it was when
/// the save began.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub ticket: Ticket,
    pub content_type: String,
    pub entry_uid: EntryUid,
    pub patch: EntryPatch,
}

/// What `complete_*` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied.
    Applied,
    /// The result belonged to a superseded request and was dropped.
    Stale,
}

/// Load/save state machine around a [`BlockEditor`].
#[derive(Debug)]
pub struct SyncController {
    config: SyncConfig,
    editor: BlockEditor,
    phase: SyncPhase,
    entry_uid: Option<EntryUid>,
    /// Advances on reset; results from older generations are stale.
    generation: u64,
    next_seq: u64,
    in_flight: Option<Ticket>,
}

impl SyncController {
    /// Creates an idle controller over an empty page.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            editor: BlockEditor::new(),
            phase: SyncPhase::Idle,
            entry_uid: None,
            generation: 0,
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Entry the page will be saved into, once a load bound one.
    pub fn entry_uid(&self) -> Option<&EntryUid> {
        self.entry_uid.as_ref()
    }

    pub fn content_type(&self) -> &str {
        &self.config.content_type
    }

    pub fn editor(&self) -> &BlockEditor {
        &self.editor
    }

    /// Editor access for page operations. Available in every phase.
    pub fn editor_mut(&mut self) -> &mut BlockEditor {
        &mut self.editor
    }

    pub fn page(&self) -> &Page {
        self.editor.page()
    }

    pub fn state(&self) -> &SessionState {
        self.editor.state()
    }

    /// Current session generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn busy(&self) -> bool {
        matches!(self.phase, SyncPhase::Loading | SyncPhase::Syncing)
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            generation: self.generation,
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    fn is_outstanding(&self, ticket: Ticket, phase: SyncPhase) -> bool {
        self.phase == phase && self.in_flight == Some(ticket)
    }

    // ── Load ─────────────────────────────────────────────────────

    /// Starts a load. `None` while another request is outstanding.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        if self.busy() {
            debug!("Load ignored, controller is {:?}", self.phase);
            return None;
        }
        let ticket = self.issue_ticket();
        self.phase = SyncPhase::Loading;
        self.editor.set_activity(Activity::Loading);
        debug!("Loading {}", self.config.content_type);

        Some(LoadRequest {
            ticket,
            content_type: self.config.content_type.clone(),
        })
    }

    /// Applies the result of a load.
    ///
    /// Success binds the first entry (or nothing, if there are none). Failure
    /// empties the page, unbinds, and sets a fixed error notice.
    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: GatewayResult<EntryList>,
    ) -> Completion {
        if !self.is_outstanding(ticket, SyncPhase::Loading) {
            warn!("Discarding stale load response");
            return Completion::Stale;
        }
        self.in_flight = None;
        self.editor.set_activity(Activity::Idle);

        match result {
            Ok(entries) => {
                match entries.into_first() {
                    Some(entry) => {
                        let page = entry.to_page();
                        info!("Loaded entry {} ({} blocks)", entry.uid, page.len());
                        self.editor.replace_page(page);
                        self.entry_uid = Some(entry.uid);
                    }
                    None => {
                        info!("No {} entries, starting empty", self.config.content_type);
                        self.editor.replace_page(Page::new());
                        self.entry_uid = None;
                    }
                }
                self.phase = SyncPhase::Ready;
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                self.editor.replace_page(Page::new());
                self.entry_uid = None;
                self.editor.set_error(LOAD_FAILED_MESSAGE);
                self.phase = SyncPhase::Error;
            }
        }
        Completion::Applied
    }

    // ── Save ─────────────────────────────────────────────────────

    /// Starts a save of the whole current page.
    ///
    /// `None`, with nothing changed, when no entry is bound or another request
    /// is outstanding.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if self.busy() {
            debug!("Save ignored, controller is {:?}", self.phase);
            return None;
        }
        let Some(entry_uid) = self.entry_uid.clone() else {
            debug!("Save ignored, no entry bound");
            return None;
        };
        let ticket = self.issue_ticket();
        self.phase = SyncPhase::Syncing;
        self.editor.set_activity(Activity::Syncing);
        let patch = EntryPatch::from_page(self.editor.page());
        debug!("Saving {} blocks to {}", patch.blocks.len(), entry_uid);

        Some(SaveRequest {
            ticket,
            content_type: self.config.content_type.clone(),
            entry_uid,
            patch,
        })
    }

    /// Applies the result of a save. The page is never touched.
    pub fn complete_save(&mut self, ticket: Ticket, result: GatewayResult<Entry>) -> Completion {
        if !self.is_outstanding(ticket, SyncPhase::Syncing) {
            warn!("Discarding stale save response");
            return Completion::Stale;
        }
        self.in_flight = None;
        self.editor.set_activity(Activity::Idle);

        match result {
            Ok(entry) => {
                info!("Synced entry {}", entry.uid);
                self.editor.set_success(SAVED_MESSAGE);
                self.phase = SyncPhase::Ready;
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.editor.set_error(SAVE_FAILED_MESSAGE);
                self.phase = SyncPhase::Error;
            }
        }
        Completion::Applied
    }

    // ── Session ──────────────────────────────────────────────────

    /// Abandons the session: unsynced edits are discarded and any outstanding
    /// response will be ignored.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.phase = SyncPhase::Idle;
        self.entry_uid = None;
        self.editor = BlockEditor::new();
        debug!("Session reset (generation {})", self.generation);
    }

    // ── Inline drivers ───────────────────────────────────────────

    /// Runs a whole load against `gateway`. `None` if no load was started.
    pub async fn load(&mut self, gateway: &dyn ContentGateway) -> Option<Completion> {
        let request = self.begin_load()?;
        let result = gateway.fetch_entries(&request.content_type).await;
        Some(self.complete_load(request.ticket, result))
    }

    /// Runs a whole save against `gateway`. `None` if no save was started.
    pub async fn save(&mut self, gateway: &dyn ContentGateway) -> Option<Completion> {
        let request = self.begin_save()?;
        let result = gateway
            .update_entry(&request.content_type, &request.entry_uid, request.patch)
            .await;
        Some(self.complete_save(request.ticket, result))
    }
}
