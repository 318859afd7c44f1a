//! Session orchestrator. Drives a [`SyncController`] from a single task.
//!
//! The event loop owns the controller. Commands come in over an mpsc channel;
//! gateway calls run in spawned tasks and report back into the same loop, so
//! every mutation of the page happens on one control flow and edits stay
//! available while a load or save is outstanding.

use crate::config::SyncConfig;
use crate::controller::{Completion, SyncController, SyncPhase, Ticket};
use crate::error::{GatewayResult, SyncError, SyncResult};
use crate::gateway::GatewayHandle;
use blockpage_editor::{EditorResult, SessionState};
use blockpage_model::{Block, BlockKind, Entry, EntryList, Page};
use blockpage_types::{BlockId, EntryUid};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

/// Notifications about remote request outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A load finished; `entry_uid` is `None` when there were no entries.
    Loaded {
        entry_uid: Option<EntryUid>,
        blocks: usize,
    },
    LoadFailed,
    Synced { entry_uid: EntryUid },
    SyncFailed,
    /// A response arrived for a superseded request and was ignored.
    StaleDiscarded,
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub page: Page,
    pub state: SessionState,
    pub phase: SyncPhase,
    pub entry_uid: Option<EntryUid>,
}

/// Command sent to the session event loop.
enum SessionCommand {
    AddBlock {
        kind: BlockKind,
        content: Option<String>,
        reply: oneshot::Sender<BlockId>,
    },
    SetContent {
        id: BlockId,
        content: String,
        reply: oneshot::Sender<bool>,
    },
    MoveBlock {
        from: usize,
        to: usize,
        reply: oneshot::Sender<EditorResult<()>>,
    },
    RequestDelete {
        id: BlockId,
        reply: oneshot::Sender<bool>,
    },
    ConfirmDelete {
        reply: oneshot::Sender<Option<Block>>,
    },
    CancelDelete,
    DismissError,
    DismissSuccess,
    /// Replies whether a load was started.
    Load { reply: oneshot::Sender<bool> },
    /// Replies whether a save was started.
    Save { reply: oneshot::Sender<bool> },
    Reset,
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// Gateway result fed back into the event loop.
enum Outcome {
    Load(Ticket, GatewayResult<EntryList>),
    Save(Ticket, GatewayResult<Entry>),
}

/// Cloneable handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
}

/// Spawns a session task on the current tokio runtime.
pub fn spawn_session(gateway: GatewayHandle, config: SyncConfig) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::channel(32);
    let (events, _) = broadcast::channel(64);
    let controller = SyncController::new(config);

    tokio::spawn(run_event_loop(controller, gateway, command_rx, events.clone()));

    SessionHandle { command_tx, events }
}

async fn run_event_loop(
    mut controller: SyncController,
    gateway: GatewayHandle,
    mut command_rx: mpsc::Receiver<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
) {
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(8);
    debug!("Session started for {}", controller.content_type());

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                match command {
                    None | Some(SessionCommand::Shutdown) => break,
                    Some(command) => handle_command(&mut controller, &gateway, &outcome_tx, command),
                }
            }
            Some(outcome) = outcome_rx.recv() => {
                let event = apply_outcome(&mut controller, outcome);
                // No subscribers is fine.
                let _ = events.send(event);
            }
        }
    }

    debug!("Session stopped");
}

fn handle_command(
    controller: &mut SyncController,
    gateway: &GatewayHandle,
    outcome_tx: &mpsc::Sender<Outcome>,
    command: SessionCommand,
) {
    match command {
        SessionCommand::AddBlock {
            kind,
            content,
            reply,
        } => {
            let editor = controller.editor_mut();
            let id = match content {
                Some(content) => editor.add_block(kind, content),
                None => editor.add_default_block(kind),
            };
            let _ = reply.send(id);
        }
        SessionCommand::SetContent { id, content, reply } => {
            let _ = reply.send(controller.editor_mut().set_block_content(&id, content));
        }
        SessionCommand::MoveBlock { from, to, reply } => {
            let _ = reply.send(controller.editor_mut().move_block(from, to));
        }
        SessionCommand::RequestDelete { id, reply } => {
            let _ = reply.send(controller.editor_mut().request_delete(&id));
        }
        SessionCommand::ConfirmDelete { reply } => {
            let _ = reply.send(controller.editor_mut().confirm_delete());
        }
        SessionCommand::CancelDelete => controller.editor_mut().cancel_delete(),
        SessionCommand::DismissError => controller.editor_mut().dismiss_error(),
        SessionCommand::DismissSuccess => controller.editor_mut().dismiss_success(),
        SessionCommand::Load { reply } => {
            let started = match controller.begin_load() {
                Some(request) => {
                    let gateway = Arc::clone(gateway);
                    let outcome_tx = outcome_tx.clone();
                    tokio::spawn(async move {
                        let result = gateway.fetch_entries(&request.content_type).await;
                        let _ = outcome_tx.send(Outcome::Load(request.ticket, result)).await;
                    });
                    true
                }
                None => false,
            };
            let _ = reply.send(started);
        }
        SessionCommand::Save { reply } => {
            let started = match controller.begin_save() {
                Some(request) => {
                    let gateway = Arc::clone(gateway);
                    let outcome_tx = outcome_tx.clone();
                    tokio::spawn(async move {
                        let result = gateway
                            .update_entry(&request.content_type, &request.entry_uid, request.patch)
                            .await;
                        let _ = outcome_tx.send(Outcome::Save(request.ticket, result)).await;
                    });
                    true
                }
                None => false,
            };
            let _ = reply.send(started);
        }
        SessionCommand::Reset => controller.reset(),
        SessionCommand::Snapshot { reply } => {
            let _ = reply.send(SessionSnapshot {
                page: controller.page().clone(),
                state: controller.state().clone(),
                phase: controller.phase(),
                entry_uid: controller.entry_uid().cloned(),
            });
        }
        SessionCommand::Shutdown => {}
    }
}

fn apply_outcome(controller: &mut SyncController, outcome: Outcome) -> SessionEvent {
    match outcome {
        Outcome::Load(ticket, result) => match controller.complete_load(ticket, result) {
            Completion::Stale => SessionEvent::StaleDiscarded,
            Completion::Applied if controller.phase() == SyncPhase::Error => {
                SessionEvent::LoadFailed
            }
            Completion::Applied => SessionEvent::Loaded {
                entry_uid: controller.entry_uid().cloned(),
                blocks: controller.page().len(),
            },
        },
        Outcome::Save(ticket, result) => match controller.complete_save(ticket, result) {
            Completion::Stale => SessionEvent::StaleDiscarded,
            Completion::Applied => match (controller.phase(), controller.entry_uid()) {
                (SyncPhase::Ready, Some(uid)) => SessionEvent::Synced {
                    entry_uid: uid.clone(),
                },
                _ => SessionEvent::SyncFailed,
            },
        },
    }
}

impl SessionHandle {
    /// Subscribes to request outcome events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn send(&self, command: SessionCommand) -> SyncResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| SyncError::ChannelClosed)
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> SyncResult<T> {
        let (reply, response) = oneshot::channel();
        self.send(make(reply)).await?;
        response.await.map_err(|_| SyncError::ChannelClosed)
    }

    /// Appends a block with the given content.
    pub async fn add_block(
        &self,
        kind: BlockKind,
        content: impl Into<String>,
    ) -> SyncResult<BlockId> {
        let content = Some(content.into());
        self.request(|reply| SessionCommand::AddBlock {
            kind,
            content,
            reply,
        })
        .await
    }

    /// Appends a block carrying the kind's default content.
    pub async fn add_default_block(&self, kind: BlockKind) -> SyncResult<BlockId> {
        self.request(|reply| SessionCommand::AddBlock {
            kind,
            content: None,
            reply,
        })
        .await
    }

    pub async fn set_block_content(
        &self,
        id: BlockId,
        content: impl Into<String>,
    ) -> SyncResult<bool> {
        let content = content.into();
        self.request(|reply| SessionCommand::SetContent { id, content, reply })
            .await
    }

    pub async fn move_block(&self, from: usize, to: usize) -> SyncResult<()> {
        self.request(|reply| SessionCommand::MoveBlock { from, to, reply })
            .await??;
        Ok(())
    }

    pub async fn request_delete(&self, id: BlockId) -> SyncResult<bool> {
        self.request(|reply| SessionCommand::RequestDelete { id, reply })
            .await
    }

    pub async fn confirm_delete(&self) -> SyncResult<Option<Block>> {
        self.request(|reply| SessionCommand::ConfirmDelete { reply })
            .await
    }

    pub async fn cancel_delete(&self) -> SyncResult<()> {
        self.send(SessionCommand::CancelDelete).await
    }

    pub async fn dismiss_error(&self) -> SyncResult<()> {
        self.send(SessionCommand::DismissError).await
    }

    pub async fn dismiss_success(&self) -> SyncResult<()> {
        self.send(SessionCommand::DismissSuccess).await
    }

    /// Starts a load. Returns whether one was started; the outcome arrives as
    /// a [`SessionEvent`].
    pub async fn load(&self) -> SyncResult<bool> {
        self.request(|reply| SessionCommand::Load { reply }).await
    }

    /// Starts a save of the current page. Returns whether one was started.
    pub async fn save(&self) -> SyncResult<bool> {
        self.request(|reply| SessionCommand::Save { reply }).await
    }

    /// Abandons the current session; outstanding responses will be discarded.
    pub async fn reset(&self) -> SyncResult<()> {
        self.send(SessionCommand::Reset).await
    }

    pub async fn snapshot(&self) -> SyncResult<SessionSnapshot> {
        self.request(|reply| SessionCommand::Snapshot { reply })
            .await
    }

    /// Stops the session task.
    pub async fn shutdown(&self) -> SyncResult<()> {
        self.send(SessionCommand::Shutdown).await
    }
}
