mod common;

use blockpage_editor::EditorError;
use blockpage_model::BlockKind;
use blockpage_sync::{
    spawn_session, SessionEvent, SessionHandle, SyncConfig, SyncError, SyncPhase,
    LOAD_FAILED_MESSAGE, SAVED_MESSAGE,
};
use common::{id, sample_entry, uid, FakeGateway};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

async fn next_event(events: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

async fn loaded_session(gateway: &Arc<FakeGateway>) -> (SessionHandle, broadcast::Receiver<SessionEvent>) {
    let session = spawn_session(gateway.clone(), SyncConfig::default());
    let mut events = session.subscribe();
    assert!(session.load().await.unwrap());
    next_event(&mut events).await;
    (session, events)
}

// ── Load ─────────────────────────────────────────────────────────

#[tokio::test]
async fn load_emits_loaded_event() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let session = spawn_session(gateway.clone(), SyncConfig::default());
    let mut events = session.subscribe();

    assert!(session.load().await.unwrap());
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::Loaded {
            entry_uid: Some(uid("blt1")),
            blocks: 2,
        }
    );

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, SyncPhase::Ready);
    assert_eq!(snapshot.entry_uid, Some(uid("blt1")));
    assert_eq!(snapshot.page.len(), 2);
}

#[tokio::test]
async fn load_failure_emits_load_failed() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    gateway.fail_fetch(true);
    let session = spawn_session(gateway.clone(), SyncConfig::default());
    let mut events = session.subscribe();

    session.load().await.unwrap();
    assert_eq!(next_event(&mut events).await, SessionEvent::LoadFailed);

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, SyncPhase::Error);
    assert_eq!(snapshot.state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(snapshot.page.is_empty());

    session.dismiss_error().await.unwrap();
    assert!(session.snapshot().await.unwrap().state.error.is_none());
}

#[tokio::test]
async fn second_load_while_loading_is_rejected() {
    let gateway = Arc::new(FakeGateway::gated(vec![sample_entry()]));
    let session = spawn_session(gateway.clone(), SyncConfig::default());
    let mut events = session.subscribe();

    assert!(session.load().await.unwrap());
    assert!(!session.load().await.unwrap());
    assert!(session.snapshot().await.unwrap().state.is_loading());

    gateway.release();
    next_event(&mut events).await;
    assert_eq!(gateway.fetch_calls(), 1);
}

// ── Save ─────────────────────────────────────────────────────────

#[tokio::test]
async fn save_emits_synced_event() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, mut events) = loaded_session(&gateway).await;

    session.set_block_content(id("1"), "hello").await.unwrap();
    assert!(session.save().await.unwrap());
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::Synced {
            entry_uid: uid("blt1")
        }
    );

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.state.success.as_deref(), Some(SAVED_MESSAGE));
    assert_eq!(gateway.stored_blocks(&uid("blt1")).unwrap()[0].content, "hello");

    session.dismiss_success().await.unwrap();
    assert!(session.snapshot().await.unwrap().state.success.is_none());
}

#[tokio::test]
async fn save_failure_emits_sync_failed() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, mut events) = loaded_session(&gateway).await;
    gateway.fail_update(true);

    session.save().await.unwrap();
    assert_eq!(next_event(&mut events).await, SessionEvent::SyncFailed);

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, SyncPhase::Error);
    assert_eq!(snapshot.page.len(), 2);
    assert_eq!(snapshot.entry_uid, Some(uid("blt1")));
}

#[tokio::test]
async fn save_without_entry_is_rejected() {
    let gateway = Arc::new(FakeGateway::new(vec![]));
    let (session, _events) = loaded_session(&gateway).await;

    session.add_default_block(BlockKind::Text).await.unwrap();
    assert!(!session.save().await.unwrap());
    assert_eq!(gateway.update_calls(), 0);
}

#[tokio::test]
async fn edits_during_save_stay_local() {
    let gateway = Arc::new(FakeGateway::gated(vec![sample_entry()]));
    let session = spawn_session(gateway.clone(), SyncConfig::default());
    let mut events = session.subscribe();
    session.load().await.unwrap();
    gateway.release();
    next_event(&mut events).await;

    assert!(session.save().await.unwrap());
    let late = session.add_block(BlockKind::Text, "late").await.unwrap();
    assert!(!session.save().await.unwrap());

    let during = session.snapshot().await.unwrap();
    assert_eq!(during.phase, SyncPhase::Syncing);
    assert!(during.page.contains(&late));

    gateway.release();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Synced { .. }));

    let updates = gateway.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1.blocks.len(), 2);
    assert!(updates[0].1.blocks.iter().all(|b| b.id != late));

    let after = session.snapshot().await.unwrap();
    assert_eq!(after.page.len(), 3);
    assert!(after.page.contains(&late));
}

// ── Reset ────────────────────────────────────────────────────────

#[tokio::test]
async fn reset_during_load_discards_response() {
    let gateway = Arc::new(FakeGateway::gated(vec![sample_entry()]));
    let session = spawn_session(gateway.clone(), SyncConfig::default());
    let mut events = session.subscribe();

    session.load().await.unwrap();
    session.reset().await.unwrap();
    gateway.release();

    assert_eq!(next_event(&mut events).await, SessionEvent::StaleDiscarded);
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, SyncPhase::Idle);
    assert!(snapshot.page.is_empty());
    assert!(snapshot.entry_uid.is_none());
}

#[tokio::test]
async fn load_after_reset_starts_fresh() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, mut events) = loaded_session(&gateway).await;

    session.add_default_block(BlockKind::Image).await.unwrap();
    session.reset().await.unwrap();
    assert!(session.load().await.unwrap());
    next_event(&mut events).await;

    assert_eq!(session.snapshot().await.unwrap().page.len(), 2);
}

// ── Editing ──────────────────────────────────────────────────────

#[tokio::test]
async fn delete_with_concurrent_add() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, _events) = loaded_session(&gateway).await;

    assert!(session.request_delete(id("1")).await.unwrap());
    let added = session.add_default_block(BlockKind::Text).await.unwrap();
    let removed = session.confirm_delete().await.unwrap().unwrap();
    assert_eq!(removed.id, id("1"));

    let snapshot = session.snapshot().await.unwrap();
    let ids: Vec<_> = snapshot.page.ids().cloned().collect();
    assert_eq!(ids, vec![id("2"), added]);
    assert!(snapshot.state.pending_delete_id.is_none());
}

#[tokio::test]
async fn cancel_delete_keeps_block() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, _events) = loaded_session(&gateway).await;

    session.request_delete(id("2")).await.unwrap();
    session.cancel_delete().await.unwrap();
    assert!(session.confirm_delete().await.unwrap().is_none());
    assert_eq!(session.snapshot().await.unwrap().page.len(), 2);
}

#[tokio::test]
async fn move_block_reports_out_of_range() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, _events) = loaded_session(&gateway).await;

    session.move_block(1, 0).await.unwrap();
    let ids: Vec<_> = session.snapshot().await.unwrap().page.ids().cloned().collect();
    assert_eq!(ids, vec![id("2"), id("1")]);

    let err = session.move_block(5, 0).await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Editor(EditorError::IndexOutOfRange { index: 5, len: 2 })
    ));
}

#[tokio::test]
async fn set_content_on_missing_block_is_noop() {
    let gateway = Arc::new(FakeGateway::new(vec![sample_entry()]));
    let (session, _events) = loaded_session(&gateway).await;

    assert!(!session.set_block_content(id("missing"), "x").await.unwrap());
}

// ── Shutdown ─────────────────────────────────────────────────────

#[tokio::test]
async fn calls_after_shutdown_fail() {
    let gateway = Arc::new(FakeGateway::new(vec![]));
    let session = spawn_session(gateway, SyncConfig::default());

    session.shutdown().await.unwrap();
    assert!(matches!(
        session.snapshot().await,
        Err(SyncError::ChannelClosed)
    ));
}
