use std::fmt::Write;

use console::style;

use crate::models::{Profile, ScanStatus};
use crate::pipeline::plan::{ProfileSource, RunMode, RunPlan};
use crate::pipeline::state::RunSummary;
use crate::utils::formatting::{format_duration, format_name_list};
use super::aggregator::AggregateOutcome;

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn format_version() -> String {
    format!(
        "{} v{} ({}, built {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_HASH").unwrap_or("unknown"),
        env!("BUILD_TIMESTAMP"),
    )
}

pub fn format_profile_source(plan: &RunPlan) -> String {
    let names = format_name_list(&plan.profiles.names());
    match &plan.source {
        ProfileSource::Explicit => format!("Using specified profiles: {}", names),
        ProfileSource::Discovered(path) => format!(
            "Found {} profiles in {}: {}",
            plan.profiles.len(),
            path.display(),
            names
        ),
    }
}

pub fn format_configuration(plan: &RunPlan) -> String {
    let mut out = String::from("\nConfiguration:\n");
    let _ = writeln!(out, "  Region: {}", plan.region);
    match &plan.mode {
        RunMode::PerProfile { log_file_name } => {
            let _ = writeln!(out, "  Base log file name: {}", log_file_name);
        }
        RunMode::Combined { output_file } => {
            let _ = writeln!(out, "  Output file: {}", output_file.display());
        }
    }
    match &plan.date_range {
        Some(range) => {
            let _ = writeln!(out, "  Date range: {} to {}", range.start, range.end);
        }
        None => out.push_str("  Date range: Last 30 days (default)\n"),
    }
    let _ = write!(out, "  Profiles to process: {}", format_name_list(&plan.profiles.names()));
    out
}

pub fn format_dry_run(plan: &RunPlan) -> String {
    let mut out = format!(
        "\n{} - Would process {} profiles:\n",
        style("DRY RUN").yellow().bold(),
        plan.profiles.len()
    );
    match &plan.mode {
        RunMode::PerProfile { .. } => {
            for (profile, path) in plan.per_profile_outputs() {
                let _ = writeln!(out, "  Profile: {} -> {}", profile, path.display());
            }
        }
        RunMode::Combined { output_file } => {
            for profile in &plan.profiles {
                let _ = writeln!(out, "  Profile: {}", profile);
            }
            let _ = writeln!(out, "  Combined results would be saved to: {}", output_file.display());
        }
    }
    out.trim_end().to_string()
}

pub fn format_progress(index: usize, total: usize, profile: &Profile) -> String {
    format!("\n[{}/{}] Processing profile: {}", index, total, profile)
}

pub fn format_profile_banner(profile: &Profile) -> String {
    format!("\n{}\nProcessing AWS Profile: {}\n{}", rule(), profile, rule())
}

fn status_label(status: ScanStatus) -> &'static str {
    match status {
        ScanStatus::Success => "",
        ScanStatus::Failure => " (failed)",
        ScanStatus::Timeout => " (timed out)",
    }
}

pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = format!("\n{}\nSCAN COMPLETED\n{}\n", rule(), rule());
    let _ = writeln!(out, "Total profiles processed: {}", summary.total);
    let _ = writeln!(out, "Successful: {}", summary.succeeded.len());
    let _ = writeln!(out, "Failed: {}", summary.failed.len());
    let _ = writeln!(out, "Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Elapsed: {}", format_duration(summary.duration.as_millis() as u64));

    if !summary.succeeded.is_empty() {
        let _ = writeln!(out, "\n{} Successful profiles:", style("✅").green());
        for profile in &summary.succeeded {
            match summary.output_for(profile) {
                Some(path) => { let _ = writeln!(out, "  {} -> {}", profile, path.display()); }
                None => { let _ = writeln!(out, "  {}", profile); }
            }
        }
    }

    if !summary.failed.is_empty() {
        let _ = writeln!(out, "\n{} Failed profiles:", style("❌").red());
        for (profile, status) in &summary.failed {
            let _ = writeln!(out, "  {}{}", profile, status_label(*status));
        }
    }

    out.push('\n');
    match (&summary.mode, &summary.combined) {
        (RunMode::PerProfile { .. }, _) => {
            out.push_str("All CSV files have been generated in the scanner working directory.");
        }
        (RunMode::Combined { output_file }, Some(AggregateOutcome::Written { rows, .. })) => {
            let _ = write!(out, "Combined CSV file: {} ({} data rows)", output_file.display(), rows);
        }
        (RunMode::Combined { .. }, Some(AggregateOutcome::Failed(reason))) => {
            let _ = write!(out, "{}  Combined CSV was not written: {}", style("⚠️").yellow(), reason);
        }
        (RunMode::Combined { .. }, _) => {
            let _ = write!(out, "{}  No data to write; combined CSV was not created", style("⚠️").yellow());
        }
    }
    out
}
