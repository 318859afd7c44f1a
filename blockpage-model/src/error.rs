//! Error types for the block model.

use blockpage_types::BlockId;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two blocks in one page share an id.
    #[error("duplicate block id: {0}")]
    DuplicateBlockId(BlockId),

    /// A position outside `[0, len)`.
    #[error("index {index} out of range for page of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A block kind name that is neither `text` nor `image`.
    #[error("unknown block kind: {0}")]
    UnknownBlockKind(String),
}
