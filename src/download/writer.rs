//! Idempotent, content-validated document download.
//!
//! [`download_document`] is the per-URL unit of work: it never re-downloads
//! a file that already exists, never leaves an empty or partial file behind,
//! and reports every result as a [`DownloadOutcome`] instead of an error.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::constants::TEMP_SUFFIX;
use super::error::DownloadError;
use super::filename::target_path;
use super::outcome::DownloadOutcome;

/// Downloads the document at `url` into `output_dir`.
///
/// Steps, each terminal on failure:
/// 1. derive the target path from the sanitized filename
/// 2. skip without any request when a regular file is already there
/// 3. fetch (exact `200 OK`, document content type, whole body buffered)
/// 4. reject empty bodies
/// 5. write to a temp file and rename it onto the target
#[instrument(skip(client, output_dir), fields(url = %url))]
pub async fn download_document(client: &HttpClient, url: &str, output_dir: &Path) -> DownloadOutcome {
    let Some(path) = target_path(output_dir, url) else {
        let error = DownloadError::empty_filename(url);
        warn!(error = %error, "download failed");
        return DownloadOutcome::Failed { error };
    };

    if is_regular_file(&path).await {
        info!(path = %path.display(), "file already exists, skipping");
        return DownloadOutcome::Skipped { path };
    }

    match fetch_and_write(client, url, &path).await {
        Ok(bytes) => {
            info!(bytes, path = %path.display(), "download complete");
            DownloadOutcome::Succeeded { path, bytes }
        }
        Err(error) => {
            warn!(error = %error, transient = error.is_transient(), "download failed");
            DownloadOutcome::Failed { error }
        }
    }
}

async fn fetch_and_write(client: &HttpClient, url: &str, path: &Path) -> Result<u64, DownloadError> {
    let body = client.fetch_document(url).await?;
    if body.is_empty() {
        return Err(DownloadError::empty_body(url));
    }
    write_atomically(path, &body).await?;
    Ok(body.len() as u64)
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Path for the in-progress file: `file.pdf` becomes `file.pdf.part`.
pub(crate) fn temp_path(final_path: &Path) -> PathBuf {
    let mut raw = final_path.as_os_str().to_owned();
    raw.push(TEMP_SUFFIX);
    PathBuf::from(raw)
}

/// Writes `bytes` next to `path` and renames the result into place.
///
/// The temp file is removed on any failure, so `path` either holds the full
/// payload or is untouched.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let temp = temp_path(path);
    let result = match write_file(&temp, bytes).await {
        Ok(()) => tokio::fs::rename(&temp, path)
            .await
            .map_err(|e| DownloadError::io(path, e)),
        Err(e) => Err(e),
    };

    if result.is_err() {
        debug!(path = %temp.display(), "cleaning up temp file after error");
        let _ = tokio::fs::remove_file(&temp).await;
    }
    result
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let mut file = File::create(path)
        .await
        .map_err(|e| DownloadError::io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| DownloadError::io(path, e))?;
    file.flush().await.map_err(|e| DownloadError::io(path, e))
}
