//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Harvest PDF links from HTML index pages and download them.
///
/// Every anchor whose href mentions ".pdf" is collected, deduplicated, and
/// downloaded into a flat directory under a filename derived from its URL.
/// Files that already exist are skipped, so re-running is cheap.
#[derive(Parser, Debug)]
#[command(name = "pdf-harvest")]
#[command(author, version, about)]
pub struct Args {
    /// Index page URLs to scan (replaces `index_urls` from the config file)
    pub index_urls: Vec<String>,

    /// Directory receiving the documents [default: PDFs]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum concurrent downloads (1-32) [default: 1]
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub concurrency: Option<u8>,

    /// Whole-request timeout in seconds (1-3600) [default: 900]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Connect timeout in seconds (1-300) [default: 30]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: Option<u64>,

    /// Append the concatenated index HTML to this file
    #[arg(long, value_name = "PATH")]
    pub save_index: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
