//! Content store sync for blockpage.
//!
//! # Architecture
//!
//! - **Gateway**: the async [`ContentGateway`] trait and its backends
//!   (Contentstack over HTTP, local JSON files). The only I/O boundary.
//! - **Controller**: [`SyncController`], a pure state machine that owns the
//!   editor and maps load/save results onto it.
//! - **Orchestrator**: [`spawn_session`], a single task that owns a controller,
//!   runs gateway calls, and feeds their results back in.
//!
//! Saves always write the whole page. There is no version check, so two
//! editors saving the same entry overwrite each other.
//!
//! # Example
//!
//! ```no_run
//! use blockpage_sync::{FileGateway, SyncConfig, SyncController};
//! use blockpage_model::BlockKind;
//!
//! # async fn run() {
//! let gateway = FileGateway::new("./store");
//! let mut controller = SyncController::new(SyncConfig::default());
//!
//! controller.load(&gateway).await;
//! controller.editor_mut().add_default_block(BlockKind::Text);
//! controller.save(&gateway).await;
//! # }
//! ```

mod config;
pub mod controller;
mod error;
pub mod gateway;
mod orchestrator;

pub use config::{GatewayConfig, SyncConfig, DEFAULT_CONTENT_TYPE};
pub use controller::{
    Completion, LoadRequest, SaveRequest, SyncController, SyncPhase, Ticket, LOAD_FAILED_MESSAGE,
    SAVED_MESSAGE, SAVE_FAILED_MESSAGE,
};
pub use error::{GatewayError, GatewayResult, SyncError, SyncResult};
pub use gateway::{
    connect, published_page, ContentGateway, ContentstackConfig, ContentstackGateway,
    FileGateway, GatewayHandle, Region,
};
pub use orchestrator::{spawn_session, SessionEvent, SessionHandle, SessionSnapshot};
