//! Document download: filename derivation, HTTP fetch, validation, writing.
//!
//! # Features
//!
//! - Deterministic, filesystem-safe filenames derived from URLs
//! - Skip-if-exists idempotence (no request is made for a present file)
//! - Content-type gate against HTML error and login pages
//! - Whole-body buffering with zero-byte rejection
//! - Temp-file-then-rename writes, so partial files never look finished
//! - Bounded concurrency with per-destination locking
//!
//! # Example
//!
//! ```no_run
//! use pdf_harvest::download::{DownloadOutcome, HttpClient, download_document};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let outcome = download_document(&client, "https://example.com/sds.pdf", Path::new("./PDFs")).await;
//! if let DownloadOutcome::Succeeded { path, bytes } = outcome {
//!     println!("wrote {bytes} bytes to {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod engine;
mod error;
mod filename;
mod outcome;
mod writer;

pub use client::{HttpClient, is_accepted_content_type};
pub use engine::{
    DEFAULT_CONCURRENCY, DownloadEngine, EngineError, EngineRun, MAX_CONCURRENCY, UrlOutcome,
};
pub use error::DownloadError;
pub use filename::{sanitize_url_filename, target_path};
pub use outcome::{DownloadOutcome, DownloadStats, OutcomeKind};
pub use writer::download_document;
