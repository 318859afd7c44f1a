//! blockpage command line editor.
//!
//! Usage:
//!   blockpage --store ./content show
//!   blockpage add text "Hello"
//!
//! Without `--store`, credentials come from `CONTENTSTACK_*` variables.

use anyhow::Result;
use blockpage_cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut stdout = std::io::stdout().lock();
    blockpage_cli::run(cli, &mut stdout).await
}
