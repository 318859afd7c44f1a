//! Command line front end for blockpage.
//!
//! Every editing command is one session: load the page, apply the edit, save
//! the whole page back. `--store DIR` edits JSON files in a local directory,
//! otherwise the Contentstack stack configured by `CONTENTSTACK_*` variables.

use anyhow::{anyhow, bail, Context, Result};
use blockpage_editor::render_text;
use blockpage_model::{BlockKind, Entry};
use blockpage_sync::{
    connect, published_page, ContentGateway, ContentstackConfig, ContentstackGateway,
    FileGateway, GatewayConfig, SyncConfig, SyncController, SyncPhase, DEFAULT_CONTENT_TYPE,
};
use blockpage_types::{BlockId, EntryUid};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "blockpage")]
#[command(about = "Edit block pages kept in a headless content store")]
pub struct Cli {
    /// Directory of JSON entry files to use instead of Contentstack
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Content type whose first entry is the page
    #[arg(long, global = true, default_value = DEFAULT_CONTENT_TYPE)]
    pub content_type: String,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the block list and a preview of the page
    Show,
    /// Append a block (`text` or `image`)
    Add {
        kind: BlockKind,
        /// Block content; the kind's placeholder when omitted
        content: Option<String>,
    },
    /// Replace a block's content
    Set { id: BlockId, content: String },
    /// Move the block at one position to another
    Move { from: usize, to: usize },
    /// Delete a block
    Delete { id: BlockId },
    /// Create an empty entry in the local store. Refuses an existing uid
    Init { uid: EntryUid },
    /// Preview the published page from the delivery API
    Published,
}

impl Cli {
    fn gateway_config(&self) -> GatewayConfig {
        match &self.store {
            Some(root) => GatewayConfig::File { root: root.clone() },
            None => GatewayConfig::Contentstack(ContentstackConfig::from_env()),
        }
    }

    fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            content_type: self.content_type.clone(),
        }
    }
}

/// Runs one command, writing user-facing output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Init { uid } => return init(&cli, uid, out).await,
        Command::Published => return published(&cli, out).await,
        _ => {}
    }

    let gateway = connect(&cli.gateway_config()).context("failed to set up content gateway")?;
    debug!("Using {} backend", gateway.provider_name());

    let mut controller = SyncController::new(cli.sync_config());
    controller.load(gateway.as_ref()).await;
    ensure_healthy(&controller)?;

    match cli.command {
        Command::Show => {
            show(&controller, out)?;
            return Ok(());
        }
        Command::Add { kind, content } => {
            let editor = controller.editor_mut();
            let id = match content {
                Some(content) => editor.add_block(kind, content),
                None => editor.add_default_block(kind),
            };
            writeln!(out, "Added {kind} block {id}")?;
        }
        Command::Set { id, content } => {
            if !controller.editor_mut().set_block_content(&id, content) {
                bail!("no block with id {id}");
            }
            writeln!(out, "Updated block {id}")?;
        }
        Command::Move { from, to } => {
            controller
                .editor_mut()
                .move_block(from, to)
                .context("failed to move block")?;
            writeln!(out, "Moved block {from} -> {to}")?;
        }
        Command::Delete { id } => {
            let editor = controller.editor_mut();
            if !editor.request_delete(&id) {
                bail!("no block with id {id}");
            }
            editor.confirm_delete();
            writeln!(out, "Deleted block {id}")?;
        }
        Command::Init { .. } | Command::Published => {}
    }

    save(&mut controller, gateway.as_ref()).await?;
    writeln!(out, "{}", controller.state().success.as_deref().unwrap_or_default())?;
    Ok(())
}

async fn save(controller: &mut SyncController, gateway: &dyn ContentGateway) -> Result<()> {
    let Some(uid) = controller.entry_uid().cloned() else {
        bail!(
            "no {} entry to save to (create one with `init`)",
            controller.content_type()
        );
    };
    controller.save(gateway).await;
    ensure_healthy(controller)?;
    info!("Saved {} blocks to {}", controller.page().len(), uid);
    Ok(())
}

/// Turns the controller's error notice into a command failure.
fn ensure_healthy(controller: &SyncController) -> Result<()> {
    if controller.phase() == SyncPhase::Error {
        let message = controller.state().error.clone().unwrap_or_default();
        return Err(anyhow!(message));
    }
    Ok(())
}

fn show(controller: &SyncController, out: &mut impl Write) -> Result<()> {
    match controller.entry_uid() {
        Some(uid) => writeln!(out, "Entry {uid} ({} blocks)", controller.page().len())?,
        None => writeln!(out, "No {} entry", controller.content_type())?,
    }
    for (index, block) in controller.page().iter().enumerate() {
        writeln!(out, "{index:>3}  {:<5}  {}", block.kind.as_str(), block.id)?;
    }
    writeln!(out)?;
    write!(out, "{}", render_text(controller.page()))?;
    Ok(())
}

async fn init(cli: &Cli, uid: &EntryUid, out: &mut impl Write) -> Result<()> {
    let Some(root) = &cli.store else {
        bail!("init only works with --store");
    };
    FileGateway::new(root)
        .create_entry(&cli.content_type, Entry::new(uid.clone()))
        .await
        .with_context(|| format!("failed to create entry {uid}"))?;
    writeln!(out, "Created entry {uid}")?;
    Ok(())
}

async fn published(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let entries = match &cli.store {
        Some(root) => FileGateway::new(root).fetch_entries(&cli.content_type).await,
        None => {
            let gateway = ContentstackGateway::new(ContentstackConfig::from_env())
                .context("failed to set up Contentstack")?;
            gateway.fetch_published(&cli.content_type).await
        }
    }
    .context("failed to fetch published content")?;

    write!(out, "{}", render_text(&published_page(&entries)))?;
    Ok(())
}
