//! Per-URL result of a download attempt and run-level tallies.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::DownloadError;

/// What happened to one candidate URL.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// A regular file already existed at the target path; no request was made.
    Skipped {
        /// The existing file.
        path: PathBuf,
    },
    /// The attempt failed; nothing was left at the target path.
    Failed {
        /// Why the attempt failed.
        error: DownloadError,
    },
    /// The document was written.
    Succeeded {
        /// Where the document was written.
        path: PathBuf,
        /// Number of bytes written (always greater than zero).
        bytes: u64,
    },
}

/// Discriminant of [`DownloadOutcome`], for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// See [`DownloadOutcome::Skipped`].
    Skipped,
    /// See [`DownloadOutcome::Failed`].
    Failed,
    /// See [`DownloadOutcome::Succeeded`].
    Succeeded,
}

impl DownloadOutcome {
    /// Returns the outcome kind.
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Skipped { .. } => OutcomeKind::Skipped,
            Self::Failed { .. } => OutcomeKind::Failed,
            Self::Succeeded { .. } => OutcomeKind::Succeeded,
        }
    }

    /// The local path for skipped and succeeded outcomes.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Skipped { path } | Self::Succeeded { path, .. } => Some(path),
            Self::Failed { .. } => None,
        }
    }

    /// The failure reason, if any.
    #[must_use]
    pub fn error(&self) -> Option<&DownloadError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Counts of outcomes over one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadStats {
    /// Documents written during this run.
    pub succeeded: usize,
    /// Documents already present from an earlier run.
    pub skipped: usize,
    /// Attempts that failed.
    pub failed: usize,
}

impl DownloadStats {
    /// Adds one outcome to the tally.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome.kind() {
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Failed => self.failed += 1,
            OutcomeKind::Succeeded => self.succeeded += 1,
        }
    }

    /// Total number of attempts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    /// Number of documents present locally after the run.
    #[must_use]
    pub fn present(&self) -> usize {
        self.succeeded + self.skipped
    }
}
