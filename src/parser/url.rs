//! Syntax validation of candidate links before download.

use tracing::debug;
use url::Url;

use super::error::{MAX_URL_LENGTH, ParseError};

/// Checks that a candidate link is an absolute `http`/`https` URL with a host.
///
/// Relative links (`/docs/a.pdf`, `a.pdf`) are rejected; the link is returned
/// unchanged on success so the download and its filename use the exact
/// extracted text.
///
/// # Errors
///
/// Returns [`ParseError`] if the link is too long, does not parse, uses
/// another scheme, or lacks a host.
///
/// # Examples
///
/// ```
/// use pdf_harvest::parser::validate_candidate_url;
///
/// assert!(validate_candidate_url("https://example.com/a.pdf").is_ok());
/// assert!(validate_candidate_url("/relative/a.pdf").is_err());
/// ```
pub fn validate_candidate_url(raw: &str) -> Result<&str, ParseError> {
    if raw.len() > MAX_URL_LENGTH {
        return Err(ParseError::too_long(raw));
    }

    let parsed = Url::parse(raw).map_err(|e| ParseError::malformed(raw, &e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(ParseError::unsupported_scheme(raw, scheme)),
    }

    if parsed.host().is_none() {
        return Err(ParseError::no_host(raw));
    }

    debug!(url = %raw, "candidate URL validated");
    Ok(raw)
}
