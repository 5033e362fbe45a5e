//! docsync: propagate mission documentation changes to booster repositories.
//!
//! # Usage
//!
//! ```text
//! docsync [--config <file>] resolve <owner/name> <number> [--json]
//! docsync [--config <file>] boosters [--mission <id>]
//! docsync [--config <file>] checkout <owner/name> <number>
//! docsync [--config <file>] propagate <path> <owner/name> <number>
//! docsync [--config <file>] run <owner/name> <number> [--continue-on-error]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    boosters::BoostersArgs, checkout::CheckoutArgs, propagate::PropagateArgs,
    resolve::ResolveArgs, run::RunArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "docsync",
    version,
    about = "Propagate mission documentation changes to booster repositories",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ~/.docsync/config.yaml.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a pull request changes a tracked documentation path.
    Resolve(ResolveArgs),

    /// List the booster catalog.
    Boosters(BoostersArgs),

    /// Check out the head of a pull request into a kept directory.
    Checkout(CheckoutArgs),

    /// Branch, commit, push and open a pull request from an edited checkout.
    Propagate(PropagateArgs),

    /// Resolve a mission pull request and propagate it to every booster.
    Run(RunArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Resolve(args) => args.run(config),
        Commands::Boosters(args) => args.run(config),
        Commands::Checkout(args) => args.run(config),
        Commands::Propagate(args) => args.run(config),
        Commands::Run(args) => args.run(config),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
