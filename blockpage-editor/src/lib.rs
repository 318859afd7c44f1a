//! Block editor engine for blockpage.
//!
//! The engine is synchronous and does no I/O. It owns the [`Page`] being
//! edited and the transient [`SessionState`] the UI renders from.
//!
//! # Operations
//!
//! - add a block (fresh id, appended)
//! - replace a block's content
//! - move a block (splice semantics)
//! - two-step delete: request, then confirm or cancel
//!
//! Every operation is all-or-nothing over the page.
//!
//! # Example
//!
//! ```
//! use blockpage_editor::BlockEditor;
//! use blockpage_model::BlockKind;
//!
//! let mut editor = BlockEditor::new();
//! let id = editor.add_default_block(BlockKind::Text);
//! editor.set_block_content(&id, "Hello");
//! editor.request_delete(&id);
//! editor.confirm_delete();
//! assert!(editor.page().is_empty());
//! ```

mod editor;
mod error;
pub mod preview;
mod state;

pub use editor::{BlockEditor, DELETED_MESSAGE};
pub use error::{EditorError, EditorResult};
pub use preview::{render, render_text, PreviewItem};
pub use state::{Activity, SessionState};

pub use blockpage_model::Page;
