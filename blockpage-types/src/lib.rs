//! Core identifier types for blockpage.
//!
//! - [`BlockId`]: identifies a block within a page. Fresh ids are UUID v7
//!   strings; ids read back from a content store are kept verbatim.
//! - [`EntryUid`]: identifies an entry in the remote content store.
//!
//! Block shapes, pages and entries live in `blockpage-model`.

mod ids;

pub use ids::{BlockId, EntryUid};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}
