//! Local file gateway.
//!
//! Each content type is one JSON file, `<root>/<content_type>.json`, holding an
//! array of entries. Useful offline and in tests.

use super::content::ContentGateway;
use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use blockpage_model::{Entry, EntryList, EntryPatch};
use blockpage_types::EntryUid;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// File-backed gateway.
pub struct FileGateway {
    root: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileGateway {
    /// Creates a gateway rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory holding the content type files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, content_type: &str) -> GatewayResult<PathBuf> {
        let valid = !content_type.is_empty()
            && content_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(GatewayError::Config(format!(
                "invalid content type name: {content_type:?}"
            )));
        }
        Ok(self.root.join(format!("{content_type}.json")))
    }

    async fn read_entries(&self, content_type: &str) -> GatewayResult<Vec<Entry>> {
        let path = self.path_for(content_type)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(GatewayError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_entries(&self, content_type: &str, entries: &[Entry]) -> GatewayResult<()> {
        let path = self.path_for(content_type)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| GatewayError::Storage(format!("failed to create store dir: {e}")))?;

        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| GatewayError::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| GatewayError::Storage(format!("failed to replace {}: {e}", path.display())))?;
        Ok(())
    }

    /// Stores `entry`, replacing any entry with the same uid.
    pub async fn insert_entry(&self, content_type: &str, entry: Entry) -> GatewayResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries(content_type).await?;
        match entries.iter_mut().find(|e| e.uid == entry.uid) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.write_entries(content_type, &entries).await?;
        info!("Stored entry in {}", content_type);
        Ok(())
    }

    /// Stores `entry` only if no entry with its uid exists yet.
    pub async fn create_entry(&self, content_type: &str, entry: Entry) -> GatewayResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries(content_type).await?;
        if entries.iter().any(|e| e.uid == entry.uid) {
            return Err(GatewayError::AlreadyExists(format!(
                "entry {} in {content_type}",
                entry.uid
            )));
        }
        let uid = entry.uid.clone();
        entries.push(entry);
        self.write_entries(content_type, &entries).await?;
        info!("Created entry {} in {}", uid, content_type);
        Ok(())
    }
}

#[async_trait]
impl ContentGateway for FileGateway {
    fn provider_name(&self) -> &'static str {
        "File"
    }

    async fn fetch_entries(&self, content_type: &str) -> GatewayResult<EntryList> {
        debug!("Reading entries for {} from {}", content_type, self.root.display());
        Ok(EntryList::new(self.read_entries(content_type).await?))
    }

    async fn update_entry(
        &self,
        content_type: &str,
        uid: &EntryUid,
        patch: EntryPatch,
    ) -> GatewayResult<Entry> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries(content_type).await?;
        let entry = entries
            .iter_mut()
            .find(|e| &e.uid == uid)
            .ok_or_else(|| GatewayError::NotFound(format!("entry {uid} in {content_type}")))?;
        entry.apply(patch);
        let updated = entry.clone();

        self.write_entries(content_type, &entries).await?;
        info!("Updated entry {} ({} blocks)", uid, updated.blocks.len());
        Ok(updated)
    }
}
