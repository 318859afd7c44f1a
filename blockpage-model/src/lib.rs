//! Block model for blockpage.
//!
//! Defines the data every other crate works on:
//! - [`Block`] and [`BlockKind`]: the atomic content unit (text or image)
//! - [`Page`]: the ordered, id-unique block sequence being edited
//! - [`Entry`], [`EntryList`], [`EntryPatch`]: the remote representation of a
//!   page as the content store sees it
//!
//! `Page` only exposes operations that keep its invariants: ids are unique and
//! reorders are permutations.

mod block;
mod entry;
mod error;
mod page;

pub use block::{Block, BlockKind};
pub use entry::{Entry, EntryList, EntryPatch};
pub use error::{ModelError, ModelResult};
pub use page::Page;
