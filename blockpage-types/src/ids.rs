//! Identifier types used throughout blockpage.
//!
//! Both ids are opaque strings on the wire. Content stores hand out their own
//! entry uids, and pages authored elsewhere may carry block ids that are not
//! UUIDs, so parsing only rejects empty input.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a block within a page.
///
/// New ids use UUID v7: time-ordered, and unique even when many blocks are
/// created within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockId(String);

impl BlockId {
    /// Creates a new, never-before-issued block ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Creates a block ID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Parses a block ID from a string. Any non-empty string is accepted.
    pub fn parse(s: &str) -> Result<Self> {
        non_empty(s).map(|s| Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BlockId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BlockId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        non_empty(&s)?;
        Ok(Self(s))
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

/// Identifier of an entry in the remote content store.
///
/// Always assigned by the store, so there is no constructor that mints one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryUid(String);

impl EntryUid {
    /// Parses an entry uid from a string.
    pub fn parse(s: &str) -> Result<Self> {
        non_empty(s).map(|s| Self(s.to_string()))
    }

    /// Returns the uid as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntryUid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for EntryUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntryUid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        non_empty(&s)?;
        Ok(Self(s))
    }
}

impl From<EntryUid> for String {
    fn from(uid: EntryUid) -> Self {
        uid.0
    }
}

fn non_empty(s: &str) -> Result<&str> {
    if s.trim().is_empty() {
        return Err(Error::InvalidId("identifier must not be empty".to_string()));
    }
    Ok(s)
}
