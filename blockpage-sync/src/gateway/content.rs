//! Content gateway trait.

use super::{ContentstackGateway, FileGateway};
use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use async_trait::async_trait;
use blockpage_model::{Entry, EntryList, EntryPatch, Page};
use blockpage_types::EntryUid;
use std::sync::Arc;

/// Remote document store holding pages as entries of a content type.
///
/// Implementations may fail or be slow on any call; callers treat every error
/// as an opaque backend failure.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Returns the name of the backend.
    fn provider_name(&self) -> &'static str;

    /// Lists the entries of a content type.
    async fn fetch_entries(&self, content_type: &str) -> GatewayResult<EntryList>;

    /// Applies `patch` to an entry: fetch current, replace patched fields,
    /// write back. Returns the entry as stored.
    async fn update_entry(
        &self,
        content_type: &str,
        uid: &EntryUid,
        patch: EntryPatch,
    ) -> GatewayResult<Entry>;
}

/// Shared handle to a gateway. Stateless per call, no teardown.
pub type GatewayHandle = Arc<dyn ContentGateway>;

/// Constructs the configured backend.
pub fn connect(config: &GatewayConfig) -> GatewayResult<GatewayHandle> {
    let handle: GatewayHandle = match config {
        GatewayConfig::Contentstack(cs) => Arc::new(ContentstackGateway::new(cs.clone())?),
        GatewayConfig::File { root } => Arc::new(FileGateway::new(root.clone())),
    };
    Ok(handle)
}

/// Page shown by the published preview: the first entry's blocks, or nothing.
pub fn published_page(entries: &EntryList) -> Page {
    entries.first().map(Entry::to_page).unwrap_or_default()
}
