use crate::cli::commands::CombinedArgs;
use crate::errors::SweepError;
use crate::pipeline::RunMode;
use super::driver::{handle_run, GlobalOptions};

pub async fn handle_combined(args: CombinedArgs, global: &GlobalOptions<'_>) -> Result<(), SweepError> {
    let mode = RunMode::Combined { output_file: args.output_file };
    handle_run(&args.scan, mode, global).await
}
