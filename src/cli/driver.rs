use std::path::Path;

use tracing::info;

use crate::cli::commands::ScanArgs;
use crate::config::{self, ExecutionConfig, Settings};
use crate::errors::SweepError;
use crate::executor::ProcessScanner;
use crate::models::DateRange;
use crate::pipeline::{resolve_profiles, RunMode, RunOrchestrator, RunOutcome, RunPlan};
use crate::reporting::formatter;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions<'a> {
    pub settings_path: Option<&'a Path>,
    pub quiet: bool,
}

/// Validate arguments, load settings and resolve profiles. Nothing is launched.
pub async fn prepare(
    args: &ScanArgs,
    mode: RunMode,
    settings_path: Option<&Path>,
) -> Result<(RunPlan, ExecutionConfig), SweepError> {
    // Date pairing is checked before anything touches the filesystem
    let date_range = DateRange::from_pair(args.start_date.as_deref(), args.end_date.as_deref())?;

    let settings = match settings_path {
        Some(path) => config::parse_settings(path).await?,
        None => Settings::default(),
    };
    let overrides = args.overrides();
    let execution = settings.resolve(&overrides);

    let aws_config = overrides.aws_config.or(settings.aws_config);
    let (profiles, source) = resolve_profiles(args.profiles.as_deref(), aws_config.as_deref()).await?;

    let plan = RunPlan {
        mode,
        region: args.region.clone(),
        date_range,
        profiles,
        source,
        work_dir: execution.work_dir.clone(),
    };
    Ok((plan, execution))
}

pub async fn handle_run(args: &ScanArgs, mode: RunMode, global: &GlobalOptions<'_>) -> Result<(), SweepError> {
    let (plan, execution) = prepare(args, mode, global.settings_path).await?;
    info!(
        region = %plan.region,
        scanner = %execution.scanner,
        timeout_secs = execution.timeout.as_secs(),
        "Prepared run"
    );

    println!("{}", formatter::format_profile_source(&plan));
    println!("{}", formatter::format_configuration(&plan));

    let orchestrator = RunOrchestrator::new(plan, ProcessScanner::new(execution)).quiet(global.quiet);
    match orchestrator.execute(args.dry_run).await {
        RunOutcome::Planned(text) => println!("{}", text),
        RunOutcome::Completed(summary) => println!("{}", formatter::format_summary(&summary)),
    }

    Ok(())
}
