//! HTTP client wrapper for index pages and documents.
//!
//! This module provides the `HttpClient` struct, which owns one pooled
//! reqwest client for the whole run and applies the document gates
//! (exact `200 OK`, accepted content type) before handing bytes back.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{ACCEPTED_CONTENT_TYPES, CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::user_agent;

/// HTTP client for fetching index pages and buffering documents.
///
/// This client is designed to be created once and reused for every request
/// of a run, taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use pdf_harvest::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let html = client.fetch_page_text("https://example.com/data-sheets").await?;
/// println!("fetched {} bytes of HTML", html.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Request timeout: 15 minutes (covers the whole body transfer)
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend or system
    /// configuration prevents building a client.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the client cannot be built.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Fetches an index page and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the URL is invalid, the request fails, the
    /// server answers with a non-success status, or the body cannot be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_page_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.send_get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        let text = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = text.len(), "index page fetched");
        Ok(text)
    }

    /// Fetches a document and buffers the whole body in memory.
    ///
    /// The response must be exactly `200 OK` and declare a document content
    /// type (see [`is_accepted_content_type`]); anything else is rejected
    /// before the body is read.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` for invalid URLs, transport failures, timeouts,
    /// non-200 statuses, unexpected content types, and body read failures.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self.send_get(url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_accepted_content_type(&content_type) {
            return Err(DownloadError::unexpected_content_type(url, content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = body.len(), content_type = %content_type, "document body buffered");
        Ok(Vec::from(body))
    }

    async fn send_get(&self, url: &str) -> Result<Response, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))
    }
}

/// Whether a `Content-Type` value denotes a downloadable document.
///
/// Matching is a case-insensitive substring test, so parameters such as
/// `; charset=binary` do not matter.
#[must_use]
pub fn is_accepted_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    ACCEPTED_CONTENT_TYPES
        .iter()
        .any(|marker| lower.contains(marker))
}
