//! CLI entry point for the pdf-harvest tool.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pdf_harvest::Harvester;
use tracing::{debug, error, info};

mod app_config;
mod cli;
mod exit_handler;

use cli::Args;
use exit_handler::{ProcessExit, determine_exit_outcome, setup_failure_exit};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr so `--json` output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    match run(&args).await {
        Ok(exit) => exit.into(),
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<ProcessExit> {
    let file_config = match app_config::load_file_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            return Ok(ProcessExit::UsageError);
        }
    };

    let config = app_config::resolve_harvest_config(args, file_config.as_ref());
    if config.index_urls.is_empty() {
        error!("No index pages given. Pass URLs as arguments or set `index_urls` in the config file.");
        return Ok(ProcessExit::UsageError);
    }

    let harvester = match Harvester::new(config) {
        Ok(harvester) => harvester,
        Err(err) => {
            error!("{err:#}");
            return Ok(setup_failure_exit(&err));
        }
    };

    info!(
        pages = harvester.config().index_urls.len(),
        output_dir = %harvester.config().output_dir.display(),
        concurrency = harvester.config().concurrency,
        "PDF harvest starting"
    );

    let report = harvester.run().await.context("Harvest run failed")?;

    info!(
        pages_fetched = report.pages_fetched,
        candidates = report.candidates,
        unique = report.unique,
        invalid = report.invalid,
        succeeded = report.stats.succeeded,
        skipped = report.stats.skipped,
        failed = report.stats.failed,
        "Harvest complete"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&report.summary())
            .context("Failed to serialize run summary")?;
        println!("{json}");
    }

    Ok(determine_exit_outcome(&report.stats))
}
