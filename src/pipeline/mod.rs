pub mod metrics;
pub mod orchestrator;
pub mod plan;
pub mod state;

pub use orchestrator::{RunOrchestrator, RunOutcome};
pub use plan::{resolve_profiles, ProfileSource, RunMode, RunPlan};
pub use state::RunSummary;
