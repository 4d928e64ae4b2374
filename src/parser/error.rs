//! Error types for candidate link validation.

use thiserror::Error;

/// Maximum URL length to accept (standard browser limit).
pub const MAX_URL_LENGTH: usize = 2000;

/// Why an extracted link cannot be downloaded.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Link is relative, malformed, or uses an unsupported scheme.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The link that failed validation.
        url: String,
        /// Why the link is invalid.
        reason: String,
    },

    /// Link exceeds the maximum allowed length.
    #[error("URL too long ({length} chars, max {max}): {url_preview}...")]
    UrlTooLong {
        /// Truncated link for display.
        url_preview: String,
        /// Actual length.
        length: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl ParseError {
    /// Creates an `InvalidUrl` error for a non-web URL scheme.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: format!("scheme '{scheme}' is not supported"),
        }
    }

    /// Creates an `InvalidUrl` error for a link that does not parse as an
    /// absolute URL (relative links included).
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL without a host.
    #[must_use]
    pub fn no_host(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        }
    }

    /// Creates a `UrlTooLong` error for URLs exceeding the maximum length.
    #[must_use]
    pub fn too_long(url: &str) -> Self {
        Self::UrlTooLong {
            url_preview: url.chars().take(50).collect(),
            length: url.len(),
            max: MAX_URL_LENGTH,
        }
    }
}
