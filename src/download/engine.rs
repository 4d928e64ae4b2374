//! Bounded download engine over a list of candidate URLs.
//!
//! The engine runs [`download_document`] for each URL with at most
//! `concurrency` attempts in flight, using a semaphore-based concurrency
//! control pattern. A concurrency of 1 is the plain sequential pipeline.
//!
//! # Concurrency Model
//!
//! - A semaphore permit is acquired before spawning each download task, so
//!   at most `concurrency` response bodies are buffered at once
//! - Permits are released automatically when downloads complete (RAII)
//! - Two URLs that sanitize to the same filename take the same per-path lock,
//!   so the existence check and the write happen as one step per path
//! - Outcomes are returned in input order regardless of completion order
//!
//! # Example
//!
//! ```no_run
//! use pdf_harvest::download::{DownloadEngine, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(4)?;
//! let client = HttpClient::new()?;
//! let urls = vec!["https://example.com/a.pdf".to_string()];
//! let run = engine.run(&client, urls, Path::new("./PDFs")).await?;
//! println!("succeeded: {}", run.stats.succeeded);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::filename::target_path;
use super::outcome::{DownloadOutcome, DownloadStats};
use super::writer::download_document;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 32;

/// Default concurrency: one download at a time.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,

    /// A download task panicked or was cancelled.
    #[error("download task for {url} did not complete: {source}")]
    Task {
        /// The URL whose task failed.
        url: String,
        /// The join error.
        #[source]
        source: tokio::task::JoinError,
    },
}

/// One URL and what happened to it.
#[derive(Debug)]
pub struct UrlOutcome {
    /// The candidate URL as extracted.
    pub url: String,
    /// The outcome of the attempt.
    pub outcome: DownloadOutcome,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct EngineRun {
    /// Per-URL outcomes, in input order.
    pub outcomes: Vec<UrlOutcome>,
    /// Tally over `outcomes`.
    pub stats: DownloadStats,
}

type PathLocks = Arc<DashMap<PathBuf, Arc<Mutex<()>>>>;

/// Download engine for bounded-concurrency document downloads.
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new engine allowing `concurrency` downloads in flight.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-32).
    ///
    /// # Example
    ///
    /// ```
    /// use pdf_harvest::download::DownloadEngine;
    ///
    /// assert!(DownloadEngine::new(1).is_ok());
    /// assert!(DownloadEngine::new(0).is_err());
    /// ```
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every URL into `output_dir`.
    ///
    /// Per-URL failures are reported as [`DownloadOutcome::Failed`] entries;
    /// only engine faults abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the semaphore closes or a task panics.
    #[instrument(skip(self, client, urls), fields(urls = urls.len(), concurrency = self.concurrency))]
    pub async fn run(
        &self,
        client: &HttpClient,
        urls: Vec<String>,
        output_dir: &Path,
    ) -> Result<EngineRun, EngineError> {
        let locks: PathLocks = Arc::new(DashMap::new());
        let mut handles: Vec<(String, JoinHandle<DownloadOutcome>)> = Vec::with_capacity(urls.len());

        for url in urls {
            let permit = Arc::clone(&self.semaphore)
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let client = client.clone();
            let output_dir = output_dir.to_path_buf();
            let locks = Arc::clone(&locks);
            let task_url = url.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let path_lock = target_path(&output_dir, &task_url)
                    .map(|path| Arc::clone(locks.entry(path).or_default().value()));
                let _guard = match &path_lock {
                    Some(lock) => Some(lock.lock().await),
                    None => None,
                };
                download_document(&client, &task_url, &output_dir).await
            });
            handles.push((url, handle));
        }

        let run = collect_outcomes(handles).await?;

        debug!(locked_paths = locks.len(), "engine run finished");
        info!(
            succeeded = run.stats.succeeded,
            skipped = run.stats.skipped,
            failed = run.stats.failed,
            "downloads finished"
        );
        Ok(run)
    }
}

/// Joins task handles in input order.
///
/// If a task panicked, every handle not yet joined is aborted so no download
/// keeps running after the engine has given up on the run.
async fn collect_outcomes(
    handles: Vec<(String, JoinHandle<DownloadOutcome>)>,
) -> Result<EngineRun, EngineError> {
    let mut run = EngineRun::default();
    let mut pending = handles.into_iter();
    while let Some((url, handle)) = pending.next() {
        match handle.await {
            Ok(outcome) => {
                run.stats.record(&outcome);
                run.outcomes.push(UrlOutcome { url, outcome });
            }
            Err(source) => {
                let aborted = pending.len();
                for (_, rest) in pending {
                    rest.abort();
                }
                warn!(url = %url, aborted, "download task did not complete, aborting the rest");
                return Err(EngineError::Task { url, source });
            }
        }
    }
    Ok(run)
}
