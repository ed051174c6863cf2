use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::{Profile, ScanStatus};
use crate::reporting::AggregateOutcome;
use super::plan::RunMode;

/// Result of a completed run, as shown in the final summary.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mode: RunMode,
    pub total: usize,
    pub succeeded: Vec<Profile>,
    pub failed: Vec<(Profile, ScanStatus)>,
    /// Per-profile output files; empty in combined mode.
    pub outputs: Vec<(Profile, PathBuf)>,
    /// Set in combined mode once aggregation has run.
    pub combined: Option<AggregateOutcome>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl RunSummary {
    pub fn output_for(&self, profile: &Profile) -> Option<&Path> {
        self.outputs
            .iter()
            .find(|(p, _)| p == profile)
            .map(|(_, path)| path.as_path())
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|(p, _)| p.as_str()).collect()
    }

    pub fn succeeded_names(&self) -> Vec<&str> {
        self.succeeded.iter().map(Profile::as_str).collect()
    }
}
