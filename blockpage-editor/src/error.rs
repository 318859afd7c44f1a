//! Error types for the editor engine.

use blockpage_model::ModelError;
use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
///
/// These are caller precondition violations, not user-facing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A reorder index outside `[0, len)`.
    #[error("index {index} out of range for page of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Any other model invariant violation.
    #[error("model error: {0}")]
    Model(ModelError),
}

impl From<ModelError> for EditorError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::IndexOutOfRange { index, len } => EditorError::IndexOutOfRange { index, len },
            other => EditorError::Model(other),
        }
    }
}
