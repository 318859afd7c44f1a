//! Content gateways: the only I/O boundary of the editor.
//!
//! - [`ContentstackGateway`]: Contentstack management API (edit) and delivery
//!   API (published preview)
//! - [`FileGateway`]: JSON files in a local directory

pub mod content;
pub mod contentstack;
pub mod file;

pub use content::{connect, published_page, ContentGateway, GatewayHandle};
pub use contentstack::{ContentstackConfig, ContentstackGateway, Region};
pub use file::FileGateway;
