//! PDF Harvest Library
//!
//! Scans HTML index pages for links to PDF documents and downloads each one
//! into a flat local directory, skipping anything already present.
//!
//! # Architecture
//!
//! - [`parser`] - Anchor extraction, order-preserving dedup, URL validation
//! - [`download`] - Filename derivation, HTTP client, idempotent writer, engine
//! - [`output`] - Output directory bootstrap and index snapshot file
//! - [`harvest`] - The end-to-end pipeline and its run report

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![warn(missing_docs)]

pub mod download;
pub mod harvest;
pub mod output;
pub mod parser;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use download::{
    DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, DownloadOutcome, DownloadStats,
    EngineError, HttpClient, MAX_CONCURRENCY, download_document, sanitize_url_filename,
};
pub use harvest::{
    DEFAULT_OUTPUT_DIR, HarvestConfig, HarvestError, HarvestReport, HarvestSummary, Harvester,
};
pub use parser::{dedup_preserving_order, extract_document_links, validate_candidate_url};
