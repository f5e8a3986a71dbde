#![deny(missing_docs)]

//! # srcpatch CLI
//!
//! Patches the vendored JUCE tree before it is compiled.
//!
//! Supported Commands:
//! - `apply`: Applies every rule, writing patched files in place.
//! - `check`: Same checks as `apply`, but writes nothing.

use clap::{Parser, Subcommand};
use srcpatch_core::{AppResult, ApplyOptions};
use tracing_subscriber::EnvFilter;

mod apply;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Idempotent source patches for vendored trees")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the patch set to the tree.
    Apply(apply::PatchArgs),
    /// Verify the patch set against the tree without writing.
    Check(apply::PatchArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> AppResult<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Apply(args) => {
            apply::execute(args, ApplyOptions::default()).await?;
        }
        Commands::Check(args) => {
            apply::execute(args, ApplyOptions { dry_run: true }).await?;
        }
    }

    Ok(())
}
