#![allow(dead_code)]

use async_trait::async_trait;
use blockpage_model::{Block, BlockKind, Entry, EntryList, EntryPatch};
use blockpage_sync::{ContentGateway, GatewayError, GatewayResult};
use blockpage_types::{BlockId, EntryUid};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// In-memory gateway with failure injection and an optional gate that holds
/// every call until released.
pub struct FakeGateway {
    entries: Mutex<Vec<Entry>>,
    updates: Mutex<Vec<(EntryUid, EntryPatch)>>,
    fail_fetch: AtomicBool,
    fail_update: AtomicBool,
    fetch_calls: AtomicUsize,
    update_calls: AtomicUsize,
    gate: Semaphore,
}

impl FakeGateway {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            updates: Mutex::new(Vec::new()),
            fail_fetch: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
        }
    }

    /// Like `new`, but every call blocks until `release` is called.
    pub fn gated(entries: Vec<Entry>) -> Self {
        Self {
            gate: Semaphore::new(0),
            ..Self::new(entries)
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<(EntryUid, EntryPatch)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn stored_blocks(&self, uid: &EntryUid) -> Option<Vec<Block>> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.uid == uid)
            .map(|e| e.blocks.clone())
    }

    async fn pass_gate(&self) {
        let _permit = self.gate.acquire().await.unwrap();
    }
}

#[async_trait]
impl ContentGateway for FakeGateway {
    fn provider_name(&self) -> &'static str {
        "Fake"
    }

    async fn fetch_entries(&self, _content_type: &str) -> GatewayResult<EntryList> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("connection reset".to_string()));
        }
        Ok(EntryList::new(self.entries.lock().unwrap().clone()))
    }

    async fn update_entry(
        &self,
        _content_type: &str,
        uid: &EntryUid,
        patch: EntryPatch,
    ) -> GatewayResult<Entry> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        self.updates.lock().unwrap().push((uid.clone(), patch.clone()));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| &e.uid == uid)
            .ok_or_else(|| GatewayError::NotFound(uid.to_string()))?;
        entry.apply(patch);
        Ok(entry.clone())
    }
}

pub fn uid(s: &str) -> EntryUid {
    EntryUid::parse(s).unwrap()
}

pub fn id(s: &str) -> BlockId {
    BlockId::parse(s).unwrap()
}

pub fn block(s: &str, kind: BlockKind, content: &str) -> Block {
    Block::with_id(id(s), kind, content)
}

/// Entry `blt1` holding `[{1, Text, a}, {2, Image, u}]`.
pub fn sample_entry() -> Entry {
    let mut entry = Entry::new(uid("blt1"));
    entry.blocks = vec![
        block("1", BlockKind::Text, "a"),
        block("2", BlockKind::Image, "u"),
    ];
    entry
}
