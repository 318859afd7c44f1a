//! Sync configuration.

use crate::gateway::ContentstackConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content type the editor reads and writes when none is configured.
pub const DEFAULT_CONTENT_TYPE: &str = "page";

/// Configuration for a sync controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Content type whose first entry is the page being edited.
    pub content_type: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// Which content gateway backend to construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum GatewayConfig {
    /// Contentstack management + delivery APIs.
    Contentstack(ContentstackConfig),
    /// JSON files in a local directory.
    File { root: PathBuf },
}
