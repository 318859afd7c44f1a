//! Error types for the sync layer.

use blockpage_editor::EditorError;
use thiserror::Error;

/// Result type for content gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures at the content gateway boundary.
///
/// The controller never shows these to the user; it logs them and surfaces a
/// fixed message instead.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure (connect, timeout, unreadable body).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Entry or content type does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An entry with that uid already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local storage error (file backend).
    #[error("storage error: {0}")]
    Storage(String),

    /// Missing or invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for session handle calls.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors returned by a [`SessionHandle`](crate::SessionHandle).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The editor rejected the operation.
    #[error("editor error: {0}")]
    Editor(#[from] EditorError),

    /// The session task has stopped.
    #[error("session closed")]
    ChannelClosed,
}
