//! Transient UI-facing session state. Never persisted.

use blockpage_types::BlockId;
use serde::{Deserialize, Serialize};

/// Which remote request, if any, is in flight.
///
/// A single enum rather than two flags, so loading and syncing can never both
/// be true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    #[default]
    Idle,
    Loading,
    Syncing,
}

/// Session state rendered alongside the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Remote request in flight.
    pub activity: Activity,
    /// Last failure message, until dismissed.
    pub error: Option<String>,
    /// Last confirmation message, until dismissed.
    pub success: Option<String>,
    /// Block awaiting delete confirmation. Always present in the page.
    pub pending_delete_id: Option<BlockId>,
}

impl SessionState {
    /// Initial fetch in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.activity == Activity::Loading
    }

    /// Save in flight.
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.activity == Activity::Syncing
    }
}
