use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::ScanResult;
use crate::reporting::AggregateOutcome;
use super::plan::RunPlan;
use super::state::RunSummary;

pub fn compute_summary(
    plan: &RunPlan,
    results: &[ScanResult],
    combined: Option<AggregateOutcome>,
    started_at: DateTime<Utc>,
    duration: Duration,
) -> RunSummary {
    let succeeded = results.iter()
        .filter(|r| r.succeeded())
        .map(|r| r.profile.clone())
        .collect();

    let failed = results.iter()
        .filter(|r| !r.succeeded())
        .map(|r| (r.profile.clone(), r.status))
        .collect();

    RunSummary {
        mode: plan.mode.clone(),
        total: plan.profiles.len(),
        succeeded,
        failed,
        outputs: plan.per_profile_outputs(),
        combined,
        started_at,
        duration,
    }
}
