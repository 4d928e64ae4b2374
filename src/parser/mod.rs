//! Link discovery: HTML anchor extraction, deduplication, URL validation.
//!
//! Data flows one way through this module: raw page text becomes a list of
//! candidate links ([`extract_document_links`]), the list loses its repeats
//! ([`dedup_preserving_order`]), and each survivor is checked for syntax
//! ([`validate_candidate_url`]) right before it is downloaded.

mod dedup;
mod error;
mod links;
mod url;

pub use dedup::dedup_preserving_order;
pub use error::{MAX_URL_LENGTH, ParseError};
pub use links::{DOCUMENT_MARKER, collect_document_links, extract_document_links};
pub use url::validate_candidate_url;
