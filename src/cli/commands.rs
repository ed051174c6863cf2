use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

const EXAMPLES: &str = "\
Examples:
  # Every profile in ~/.aws/config, one CSV per profile
  acctsweep per-profile --region us-east-1 --log-file-name analysis

  # Specific profiles only, merged into one CSV
  acctsweep combined --region us-east-1 --output-file combined_analysis.csv --profiles prod,dev,test

  # Custom date range
  acctsweep combined --region us-east-1 --output-file combined_analysis.csv --start-date 20240101 --end-date 20240131";

#[derive(Parser)]
#[command(
    name = "acctsweep",
    version,
    about = "Run the deployment scanner for every AWS profile",
    after_help = EXAMPLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Do not echo scanner output on success
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan each profile and keep one CSV per profile
    PerProfile(PerProfileArgs),
    /// Scan each profile and merge the results into a single CSV
    Combined(CombinedArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ScanArgs {
    /// AWS Region
    #[arg(long)]
    pub region: String,

    /// Start date for historical usage calculations, format=YYYYMMDD
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date for historical usage calculations, format=YYYYMMDD
    #[arg(long)]
    pub end_date: Option<String>,

    /// Comma-separated list of specific profiles to process (default: all profiles)
    #[arg(long)]
    pub profiles: Option<String>,

    /// Show which profiles would be processed without running the scanner
    #[arg(long)]
    pub dry_run: bool,

    /// Scanner script, relative to the work directory
    #[arg(long)]
    pub scanner: Option<String>,

    /// Interpreter used to launch the scanner
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Per-profile timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Directory the scanner runs in and writes its CSV to
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// AWS config file to discover profiles from
    #[arg(long)]
    pub aws_config: Option<PathBuf>,
}

impl ScanArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            scanner: self.scanner.clone(),
            interpreter: self.interpreter.clone(),
            timeout_secs: self.timeout,
            work_dir: self.work_dir.clone(),
            aws_config: self.aws_config.clone(),
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct PerProfileArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Base log file name for CSV output (profile name is appended)
    #[arg(long)]
    pub log_file_name: String,
}

#[derive(Args, Clone, Debug)]
pub struct CombinedArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output CSV file name for combined results
    #[arg(long)]
    pub output_file: PathBuf,
}
