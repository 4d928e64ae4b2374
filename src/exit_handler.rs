//! Exit code logic for the harvest process.
//!
//! Single responsibility: map a finished run to the process exit outcome.

use std::process::ExitCode;

use pdf_harvest::{DownloadStats, EngineError, HarvestError};

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// At least one document is present locally.
    Success,
    /// The run completed but nothing was harvested.
    NothingHarvested,
    /// The environment prevented the run (client setup, engine fault).
    Failure,
    /// Configuration or usage error before the run started.
    UsageError,
}

impl ProcessExit {
    /// Numeric exit status.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NothingHarvested | Self::Failure => 1,
            Self::UsageError => 2,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Determines the process exit outcome from the run's download tally.
///
/// Skipped documents count as harvested: they are on disk from an earlier run.
pub fn determine_exit_outcome(stats: &DownloadStats) -> ProcessExit {
    if stats.present() > 0 {
        ProcessExit::Success
    } else {
        ProcessExit::NothingHarvested
    }
}

/// Maps a harvester setup failure to the process exit outcome.
///
/// Only an out-of-range concurrency is the caller's fault; anything else
/// comes from the environment.
pub fn setup_failure_exit(error: &HarvestError) -> ProcessExit {
    match error {
        HarvestError::Engine(EngineError::InvalidConcurrency { .. }) => ProcessExit::UsageError,
        _ => ProcessExit::Failure,
    }
}
