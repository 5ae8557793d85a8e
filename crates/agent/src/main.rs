//! # PFPS Agent CLI
//!
//! Inspects the per-node status records written by the status collector.
//!
//! ```text
//! pfps-agent status node.example.com
//! pfps-agent status node.example.com --json
//! pfps-agent list --dir /run/pfpstatus
//! ```
//!
//! The directory comes from `--dir`, then `PFP_STATUS_DUMP`, then
//! `/run/pfpstatus`. Logs go to stderr; stdout carries only command output.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pfps_common::config::{DEFAULT_BASE_DIRECTORY, STATUS_DUMP_ENV};
use tracing::Level;

mod cmd_status;

#[derive(Parser)]
#[command(version, about = "PFPS Agent CLI: pod fingerprint status inspection")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest status record of one node
    Status {
        /// Node name as reported by the scheduler
        node: String,
        /// Status directory
        #[arg(long, env = STATUS_DUMP_ENV, default_value = DEFAULT_BASE_DIRECTORY)]
        dir: PathBuf,
        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every status record in the directory
    List {
        /// Status directory
        #[arg(long, env = STATUS_DUMP_ENV, default_value = DEFAULT_BASE_DIRECTORY)]
        dir: PathBuf,
        /// Print records as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Status { node, dir, json } => cmd_status::handle_status(&dir, &node, json),
        Commands::List { dir, json } => cmd_status::handle_list(&dir, json),
    }
}
