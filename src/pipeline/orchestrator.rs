use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::executor::{BatchExecutor, Scanner};
use crate::reporting::{formatter, write_combined};
use super::metrics::compute_summary;
use super::plan::{RunMode, RunPlan};
use super::state::RunSummary;

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Dry run: the rendered plan. No scanner was invoked.
    Planned(String),
    Completed(RunSummary),
}

/// Drives one run: scan every profile in order, then aggregate.
pub struct RunOrchestrator<S: Scanner> {
    plan: RunPlan,
    executor: BatchExecutor<S>,
}

impl<S: Scanner> RunOrchestrator<S> {
    pub fn new(plan: RunPlan, scanner: S) -> Self {
        let executor = BatchExecutor::new(scanner, plan.work_dir.clone(), plan.artifact_policy());
        Self { plan, executor }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.executor = self.executor.quiet(quiet);
        self
    }

    pub fn scanner(&self) -> &S {
        self.executor.scanner()
    }

    pub async fn execute(&self, dry_run: bool) -> RunOutcome {
        if dry_run {
            info!(profiles = self.plan.profiles.len(), "Dry run, skipping scanner");
            return RunOutcome::Planned(formatter::format_dry_run(&self.plan));
        }
        RunOutcome::Completed(self.run().await)
    }

    pub async fn run(&self) -> RunSummary {
        let started_at = Utc::now();
        let clock = Instant::now();
        let requests = self.plan.requests();

        println!("\nStarting processing of {} profiles...", requests.len());
        let results = self.executor.execute(&requests).await;

        let combined = match &self.plan.mode {
            RunMode::Combined { output_file } => Some(write_combined(&results, output_file).await),
            RunMode::PerProfile { .. } => None,
        };

        let summary = compute_summary(&self.plan, &results, combined, started_at, clock.elapsed());
        info!(
            total = summary.total,
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "Run completed"
        );
        summary
    }
}
