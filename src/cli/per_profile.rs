use crate::cli::commands::PerProfileArgs;
use crate::errors::SweepError;
use crate::pipeline::RunMode;
use super::driver::{handle_run, GlobalOptions};

pub async fn handle_per_profile(args: PerProfileArgs, global: &GlobalOptions<'_>) -> Result<(), SweepError> {
    let mode = RunMode::PerProfile { log_file_name: args.log_file_name };
    handle_run(&args.scan, mode, global).await
}
