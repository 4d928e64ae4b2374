//! Local filesystem setup: the output directory and the index snapshot file.

use std::path::Path;

use tokio::fs::{DirBuilder, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Permission bits for a created output directory (`rwxr-xr-x`).
pub const OUTPUT_DIR_MODE: u32 = 0o755;

/// Permission bits for a created index snapshot file (`rw-r--r--`).
pub const SNAPSHOT_FILE_MODE: u32 = 0o644;

/// Makes sure `path` is a directory, creating it (and missing parents) if absent.
///
/// # Errors
///
/// Returns the IO error if the directory cannot be created, or if `path`
/// exists but is not a directory.
#[instrument(fields(path = %path.display()))]
pub async fn ensure_output_dir(path: &Path) -> std::io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            debug!("output directory exists");
            return Ok(());
        }
        Ok(_) => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", path.display()),
            ));
        }
        Err(_) => {}
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(OUTPUT_DIR_MODE);
    builder.create(path).await?;
    info!("created output directory");
    Ok(())
}

/// Appends `content` and a trailing newline to the snapshot file at `path`.
///
/// # Errors
///
/// Returns the IO error if the file cannot be opened or written.
#[instrument(skip(content), fields(path = %path.display(), bytes = content.len()))]
pub async fn append_index_snapshot(path: &Path, content: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(SNAPSHOT_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(content.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;
    debug!("index snapshot appended");
    Ok(())
}
