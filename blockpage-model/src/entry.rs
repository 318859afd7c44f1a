//! Remote representation of a page.

use crate::{Block, Page};
use blockpage_types::EntryUid;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An entry in the content store.
///
/// Only `uid` and `blocks` are interpreted. Every other field the store sends
/// is kept in `fields` so a read-modify-write update sends it back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub uid: EntryUid,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blocks: Vec<Block>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entry {
    /// Creates an entry with no blocks and no extra fields.
    pub fn new(uid: EntryUid) -> Self {
        Self {
            uid,
            blocks: Vec::new(),
            fields: Map::new(),
        }
    }

    /// Sets an extra field (title, locale, ...).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Projects the stored blocks into a [`Page`], repairing duplicate ids.
    #[must_use]
    pub fn to_page(&self) -> Page {
        Page::from_remote(self.blocks.clone())
    }

    /// Applies a patch in place. `blocks` is replaced wholesale.
    pub fn apply(&mut self, patch: EntryPatch) {
        self.blocks = patch.blocks;
    }
}

/// Result of listing entries for a content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryList {
    pub items: Vec<Entry>,
}

impl EntryList {
    /// Wraps a list of entries.
    pub fn new(items: Vec<Entry>) -> Self {
        Self { items }
    }

    /// The entry the editor binds to: the first one returned.
    #[must_use]
    pub fn first(&self) -> Option<&Entry> {
        self.items.first()
    }

    /// Takes ownership of the first entry.
    #[must_use]
    pub fn into_first(self) -> Option<Entry> {
        self.items.into_iter().next()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Fields written back on save: the full block list, never a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub blocks: Vec<Block>,
}

impl EntryPatch {
    /// Snapshots a page into a patch.
    #[must_use]
    pub fn from_page(page: &Page) -> Self {
        Self {
            blocks: page.blocks().to_vec(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Block>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Block>>::deserialize(deserializer)?.unwrap_or_default())
}
