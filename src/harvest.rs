//! The harvest pipeline: index pages in, documents on disk out.
//!
//! ```text
//! index pages ─fetch─▶ concatenated HTML ─extract─▶ candidate links
//!     ─dedup─▶ unique links ─validate─▶ download engine ─▶ HarvestReport
//! ```
//!
//! Nothing in here is fatal for the run except building the HTTP client or
//! the engine: unreachable index pages contribute no text, invalid links are
//! counted and skipped, and each download reports its own outcome.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::download::constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::download::{
    DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, DownloadOutcome, DownloadStats,
    EngineError, HttpClient, OutcomeKind, UrlOutcome,
};
use crate::output::{append_index_snapshot, ensure_output_dir};
use crate::parser::{dedup_preserving_order, extract_document_links, validate_candidate_url};

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "PDFs";

/// Settings for one harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Pages whose anchors are scanned, in fetch order.
    pub index_urls: Vec<String>,
    /// Flat directory receiving the documents.
    pub output_dir: PathBuf,
    /// Maximum downloads in flight.
    pub concurrency: usize,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// When set, the concatenated index HTML is appended here.
    pub save_index: Option<PathBuf>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            index_urls: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            concurrency: DEFAULT_CONCURRENCY,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            save_index: None,
        }
    }
}

/// Setup failures that prevent a run from starting.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] DownloadError),

    /// The download engine rejected its settings or failed mid-run.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Everything a run did.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Index pages attempted.
    pub pages_requested: usize,
    /// Index pages that returned text.
    pub pages_fetched: usize,
    /// Candidate links found, duplicates included.
    pub candidates: usize,
    /// Candidate links after deduplication.
    pub unique: usize,
    /// Unique links rejected by URL validation.
    pub invalid: usize,
    /// Outcome tally over attempted downloads.
    pub stats: DownloadStats,
    /// Per-URL outcomes, in first-seen order.
    pub outcomes: Vec<UrlOutcome>,
}

impl HarvestReport {
    /// Whether at least one document is present locally after the run.
    #[must_use]
    pub fn harvested_any(&self) -> bool {
        self.stats.present() > 0
    }

    /// Serializable view of the report.
    #[must_use]
    pub fn summary(&self) -> HarvestSummary {
        HarvestSummary {
            pages_requested: self.pages_requested,
            pages_fetched: self.pages_fetched,
            candidates: self.candidates,
            unique: self.unique,
            invalid: self.invalid,
            stats: self.stats,
            outcomes: self
                .outcomes
                .iter()
                .map(|entry| OutcomeSummary {
                    url: entry.url.clone(),
                    outcome: entry.outcome.kind(),
                    path: entry
                        .outcome
                        .path()
                        .map(|path| path.display().to_string()),
                    bytes: match &entry.outcome {
                        DownloadOutcome::Succeeded { bytes, .. } => Some(*bytes),
                        _ => None,
                    },
                    error: entry.outcome.error().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// JSON-friendly run summary.
#[derive(Debug, Serialize)]
pub struct HarvestSummary {
    /// Index pages attempted.
    pub pages_requested: usize,
    /// Index pages that returned text.
    pub pages_fetched: usize,
    /// Candidate links found, duplicates included.
    pub candidates: usize,
    /// Candidate links after deduplication.
    pub unique: usize,
    /// Unique links rejected by URL validation.
    pub invalid: usize,
    /// Outcome tally over attempted downloads.
    pub stats: DownloadStats,
    /// Per-URL outcomes, in first-seen order.
    pub outcomes: Vec<OutcomeSummary>,
}

/// JSON-friendly per-URL outcome.
#[derive(Debug, Serialize)]
pub struct OutcomeSummary {
    /// The candidate URL as extracted.
    pub url: String,
    /// Skipped, failed, or succeeded.
    pub outcome: OutcomeKind,
    /// Local file, for skipped and succeeded outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Bytes written, for succeeded outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    /// Failure reason, for failed outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Index pages attempted and fetched by one run.
#[derive(Debug, Default, Clone, Copy)]
struct PageCounts {
    requested: usize,
    fetched: usize,
}

/// Runs the pipeline for a [`HarvestConfig`].
#[derive(Debug)]
pub struct Harvester {
    config: HarvestConfig,
    client: HttpClient,
    engine: DownloadEngine,
}

impl Harvester {
    /// Builds the HTTP client and engine for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError`] if the client cannot be built or the
    /// concurrency value is out of range.
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let client =
            HttpClient::with_timeouts(config.connect_timeout_secs, config.request_timeout_secs)?;
        let engine = DownloadEngine::new(config.concurrency)?;
        Ok(Self {
            config,
            client,
            engine,
        })
    }

    /// Returns the run configuration.
    #[must_use]
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Fetches every index page, optionally snapshots the combined HTML,
    /// and harvests the documents it links to.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Engine`] only if the engine itself fails;
    /// per-page and per-document failures are logged and counted.
    #[instrument(skip(self), fields(pages = self.config.index_urls.len()))]
    pub async fn run(&self) -> Result<HarvestReport, HarvestError> {
        let (html, pages_fetched) = self.fetch_index_pages().await;

        if let Some(snapshot) = &self.config.save_index
            && let Err(error) = append_index_snapshot(snapshot, &html).await
        {
            warn!(path = %snapshot.display(), error = %error, "failed to save index snapshot");
        }

        let pages = PageCounts {
            requested: self.config.index_urls.len(),
            fetched: pages_fetched,
        };
        self.harvest(&html, pages).await
    }

    /// Fetches the index pages in order and concatenates their text.
    ///
    /// A page that cannot be fetched contributes an empty string.
    pub async fn fetch_index_pages(&self) -> (String, usize) {
        let mut combined = String::new();
        let mut fetched = 0;
        for url in &self.config.index_urls {
            info!(url = %url, "scraping index page");
            match self.client.fetch_page_text(url).await {
                Ok(text) => {
                    combined.push_str(&text);
                    fetched += 1;
                }
                Err(error) => warn!(url = %url, error = %error, "failed to fetch index page"),
            }
        }
        (combined, fetched)
    }

    /// Runs extraction, deduplication, validation, and downloading over
    /// HTML obtained elsewhere. No index page is fetched, so both page
    /// counts in the report are zero.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Engine`] if the download engine fails.
    pub async fn harvest_html(&self, html: &str) -> Result<HarvestReport, HarvestError> {
        self.harvest(html, PageCounts::default()).await
    }

    async fn harvest(&self, html: &str, pages: PageCounts) -> Result<HarvestReport, HarvestError> {
        let candidates = extract_document_links(html);
        let candidate_count = candidates.len();
        let unique = dedup_preserving_order(candidates);
        let unique_count = unique.len();
        info!(candidates = candidate_count, unique = unique_count, "document links found");

        let mut invalid = 0;
        let valid: Vec<String> = unique
            .into_iter()
            .filter(|url| match validate_candidate_url(url) {
                Ok(_) => true,
                Err(error) => {
                    warn!(error = %error, "skipping invalid link");
                    invalid += 1;
                    false
                }
            })
            .collect();

        if !valid.is_empty()
            && let Err(error) = ensure_output_dir(&self.config.output_dir).await
        {
            // Downloads will fail individually with the underlying IO error.
            warn!(
                path = %self.config.output_dir.display(),
                error = %error,
                "failed to create output directory"
            );
        }

        let run = self
            .engine
            .run(&self.client, valid, &self.config.output_dir)
            .await?;
        debug!(total = run.stats.total(), "harvest finished");

        Ok(HarvestReport {
            pages_requested: pages.requested,
            pages_fetched: pages.fetched,
            candidates: candidate_count,
            unique: unique_count,
            invalid,
            stats: run.stats,
            outcomes: run.outcomes,
        })
    }
}
