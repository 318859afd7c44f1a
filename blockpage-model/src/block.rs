use crate::ModelError;
use blockpage_types::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a block holds. Closed set; every consumer matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Display text.
    Text,
    /// A URI reference to an image.
    Image,
}

impl BlockKind {
    /// Content a freshly added block of this kind starts with.
    #[must_use]
    pub fn default_content(self) -> &'static str {
        match self {
            BlockKind::Text => "New Text",
            BlockKind::Image => "https://via.placeholder.com/150",
        }
    }

    /// Wire name (`"text"` / `"image"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(BlockKind::Text),
            "image" => Ok(BlockKind::Image),
            other => Err(ModelError::UnknownBlockKind(other.to_string())),
        }
    }
}

/// The atomic content unit of a page.
///
/// Serializes to `{"id": "...", "type": "text", "content": "..."}`, the shape
/// stored in the content store's `blocks` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
}

impl Block {
    /// Creates a block with a fresh id.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self::with_id(BlockId::new(), kind, content)
    }

    /// Creates a block with a caller-supplied id.
    pub fn with_id(id: BlockId, kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
        }
    }

    /// Shorthand for a text block with a fresh id.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, content)
    }

    /// Shorthand for an image block with a fresh id.
    pub fn image(uri: impl Into<String>) -> Self {
        Self::new(BlockKind::Image, uri)
    }
}
