//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use sync_core::SymlinkPolicy;

/// syncfolders - Keep a replica folder identical to a source folder
///
/// Every INTERVAL seconds the replica is compared with the source and
/// brought back in line: missing files are copied, changed files are
/// replaced, and anything not present in the source is removed.
///
/// Values given on the command line override those read from --config.
#[derive(Parser, Debug)]
#[command(name = "syncfolders")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Source folder to mirror [default: source]
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Replica folder kept identical to the source [default: replica]
    #[arg(short, long, value_name = "DIR")]
    pub replica: Option<PathBuf>,

    /// File that receives a copy of every log line [default: syncfolders.log]
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Seconds between passes [default: 5]
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: Option<u64>,

    /// Read settings from a TOML or JSON file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,

    /// Report what would change without touching the replica
    #[arg(long)]
    pub dry_run: bool,

    /// How symlinks in the source are treated (skip or follow) [default: skip]
    #[arg(long, value_name = "POLICY")]
    pub symlinks: Option<SymlinkPolicy>,

    /// Print each pass report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
