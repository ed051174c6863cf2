use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ExecutionConfig;
use crate::errors::SweepError;
use crate::models::ScanRequest;

/// Captured output of one finished scanner process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ScanOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs the external scanner for a single request.
///
/// Returns `Ok` for any process that ran to completion, whatever its exit code.
/// Timeouts and launch failures come back as [`SweepError::Timeout`] and
/// [`SweepError::Launch`].
#[async_trait]
pub trait Scanner: Send + Sync {
    async fn scan(&self, request: &ScanRequest) -> Result<ScanOutput, SweepError>;
}

/// Launches `<interpreter> <scanner> <args>` in the work directory.
pub struct ProcessScanner {
    config: ExecutionConfig,
}

impl ProcessScanner {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    fn command(&self, request: &ScanRequest) -> Command {
        let mut cmd = Command::new(&self.config.interpreter);
        cmd.arg(&self.config.scanner)
            .args(request.scanner_args())
            .current_dir(&self.config.work_dir)
            .env(&self.config.profile_env, request.profile.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Scanner for ProcessScanner {
    async fn scan(&self, request: &ScanRequest) -> Result<ScanOutput, SweepError> {
        debug!(
            profile = %request.profile,
            interpreter = %self.config.interpreter,
            scanner = %self.config.scanner,
            args = ?request.scanner_args(),
            "Launching scanner"
        );

        let mut child = self.command(request).spawn().map_err(|e| {
            SweepError::Launch(format!(
                "{} {}: {}",
                self.config.interpreter, self.config.scanner, e
            ))
        })?;

        let mut stdout = child.stdout.take()
            .ok_or_else(|| SweepError::Launch("scanner stdout was not captured".into()))?;
        let mut stderr = child.stderr.take()
            .ok_or_else(|| SweepError::Launch("scanner stderr was not captured".into()))?;

        // Drain both pipes while waiting so a chatty child never blocks on a full pipe
        let run = async {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let (status, out_read, err_read) = tokio::join!(
                child.wait(),
                stdout.read_to_end(&mut out),
                stderr.read_to_end(&mut err),
            );
            out_read?;
            err_read?;
            Ok::<_, std::io::Error>((status?, out, err))
        };
        let outcome = tokio::time::timeout(self.config.timeout, run).await;

        match outcome {
            Ok(Ok((status, out, err))) => Ok(ScanOutput {
                exit_code: status.code(),
                stdout: String::from_utf8_lossy(&out).into_owned(),
                stderr: String::from_utf8_lossy(&err).into_owned(),
            }),
            Ok(Err(e)) => Err(SweepError::Io(e)),
            Err(_) => {
                // kill() also reaps the child
                if let Err(e) = child.kill().await {
                    warn!(profile = %request.profile, error = %e, "Failed to kill timed-out scanner");
                }
                Err(SweepError::Timeout(self.config.timeout.as_secs()))
            }
        }
    }
}
