use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use crate::errors::SweepError;
use crate::models::{ScanRequest, ScanResult, ScanStatus};
use crate::reporting::formatter;
use crate::utils::formatting::format_duration;
use crate::utils::truncation::{truncate_error, truncate_output};
use super::scanner::{ScanOutput, Scanner};

/// What to do with the CSV a successful scanner run leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactPolicy {
    /// Leave `<name>.csv` in place (per-profile files mode).
    Leave,
    /// Read `<name>.csv` into the result, then delete it (combined mode).
    Collect,
}

/// Runs scan requests one after another. A failing profile never stops the batch.
pub struct BatchExecutor<S: Scanner> {
    scanner: S,
    work_dir: PathBuf,
    policy: ArtifactPolicy,
    echo_stdout: bool,
}

impl<S: Scanner> BatchExecutor<S> {
    pub fn new(scanner: S, work_dir: impl Into<PathBuf>, policy: ArtifactPolicy) -> Self {
        Self {
            scanner,
            work_dir: work_dir.into(),
            policy,
            echo_stdout: true,
        }
    }

    /// Suppress echoing scanner stdout on success.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.echo_stdout = !quiet;
        self
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub async fn execute(&self, requests: &[ScanRequest]) -> Vec<ScanResult> {
        let total = requests.len();
        let mut results = Vec::with_capacity(total);

        for (index, request) in requests.iter().enumerate() {
            println!("{}", formatter::format_progress(index + 1, total, &request.profile));
            results.push(self.run_one(request).await);
        }

        results
    }

    async fn run_one(&self, request: &ScanRequest) -> ScanResult {
        println!("{}", formatter::format_profile_banner(&request.profile));

        let started = Instant::now();
        let artifact = self.work_dir.join(request.artifact_name());
        let outcome = self.scanner.scan(request).await;

        let mut result = ScanResult {
            profile: request.profile.clone(),
            status: ScanStatus::Failure,
            rows: Vec::new(),
            diagnostics: String::new(),
            artifact,
            elapsed: started.elapsed(),
        };

        match outcome {
            Ok(output) if output.success() => self.on_success(&mut result, output).await,
            Ok(output) => {
                let code = output.exit_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                warn!(profile = %result.profile, exit_code = %code, "Scanner exited with failure");
                println!("❌ Error processing profile: {}", result.profile);
                println!("Error: {}", truncate_error(&output.stderr));
                result.diagnostics = output.stderr;
            }
            Err(SweepError::Timeout(secs)) => {
                warn!(profile = %result.profile, timeout_secs = secs, "Scanner timed out");
                println!("⏰ Timeout processing profile: {}", result.profile);
                result.status = ScanStatus::Timeout;
                result.diagnostics = SweepError::Timeout(secs).to_string();
            }
            Err(e) => {
                warn!(profile = %result.profile, error = %e, "Scanner invocation failed");
                println!("❌ Exception processing profile {}: {}", result.profile, e);
                result.diagnostics = e.to_string();
            }
        }

        info!(
            profile = %result.profile,
            status = %result.status,
            elapsed = %format_duration(result.elapsed.as_millis() as u64),
            "Profile finished"
        );
        result
    }

    async fn on_success(&self, result: &mut ScanResult, output: ScanOutput) {
        println!("✅ Successfully processed profile: {}", result.profile);
        if self.echo_stdout && !output.stdout.is_empty() {
            println!("Output:");
            println!("{}", truncate_output(&output.stdout));
        }
        result.diagnostics = output.stderr;
        result.status = ScanStatus::Success;

        match self.policy {
            ArtifactPolicy::Leave => {
                if !result.artifact.exists() {
                    warn!(profile = %result.profile, path = %result.artifact.display(), "Scanner reported success but wrote no CSV");
                    println!("⚠️  Warning: CSV file not found for profile {}", result.profile);
                }
            }
            ArtifactPolicy::Collect => match collect_artifact(&result.artifact).await {
                Ok(Some(rows)) if !rows.is_empty() => result.rows = rows,
                Ok(Some(_)) => {
                    warn!(profile = %result.profile, "Scanner CSV was empty");
                    println!("⚠️  Warning: CSV file was empty for profile {}", result.profile);
                    result.status = ScanStatus::Failure;
                    result.diagnostics = "CSV file was empty".into();
                }
                Ok(None) => {
                    warn!(profile = %result.profile, path = %result.artifact.display(), "Scanner reported success but wrote no CSV");
                    println!("⚠️  Warning: CSV file not found for profile {}", result.profile);
                    result.status = ScanStatus::Failure;
                    result.diagnostics = "CSV file not found".into();
                }
                Err(e) => {
                    warn!(profile = %result.profile, error = %e, "Failed to read scanner CSV");
                    println!("❌ Exception processing profile {}: {}", result.profile, e);
                    result.status = ScanStatus::Failure;
                    result.diagnostics = e.to_string();
                }
            },
        }
    }
}

/// Read every record of the artifact, header included, then delete the file.
/// Returns `Ok(None)` when there is no artifact.
pub async fn collect_artifact(path: &Path) -> Result<Option<Vec<Vec<String>>>, SweepError> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = tokio::fs::read(path).await?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tokio::fs::remove_file(path).await?;
    Ok(Some(rows))
}
