use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::SweepError;
use crate::models::{Profile, ScanResult};

/// One header plus the data rows of every successful result.
///
/// Results whose header differs from the first one are not reconciled; their
/// rows are appended under the first header as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedOutput {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CombinedOutput {
    /// Returns `None` when no successful result has any rows.
    pub fn from_results(results: &[ScanResult]) -> Option<Self> {
        let successful: Vec<&ScanResult> = results.iter().filter(|r| r.succeeded()).collect();

        let header = successful
            .iter()
            .find_map(|r| r.rows.first())
            .filter(|h| !h.is_empty())?
            .clone();

        let mut header_mismatches = 0;
        let mut rows = Vec::new();
        for result in &successful {
            if result.rows.len() <= 1 {
                continue;
            }
            if result.rows[0] != header {
                header_mismatches += 1;
                warn!(profile = %result.profile, "CSV header differs from the first result; appending rows unchanged");
            }
            rows.extend(result.data_rows().iter().cloned());
        }
        if header_mismatches > 0 {
            warn!(count = header_mismatches, "Combined CSV contains rows from mismatched headers");
        }

        Some(Self { header, rows })
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, SweepError> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(vec![]);

        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }

        wtr.into_inner()
            .map_err(|e| SweepError::Io(e.into_error()))
    }

    pub async fn write_to(&self, path: &Path) -> Result<(), SweepError> {
        let bytes = self.to_csv_bytes()?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

/// What happened to the combined output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    Written { path: PathBuf, rows: usize },
    NoData,
    Failed(String),
}

/// Merge successful results into `path`. Nothing is written when there is no data.
pub async fn write_combined(results: &[ScanResult], path: &Path) -> AggregateOutcome {
    let Some(combined) = CombinedOutput::from_results(results) else {
        warn!("No data to write");
        return AggregateOutcome::NoData;
    };

    match combined.write_to(path).await {
        Ok(()) => {
            info!(path = %path.display(), rows = combined.rows.len(), "Combined CSV written");
            AggregateOutcome::Written {
                path: path.to_path_buf(),
                rows: combined.rows.len(),
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to write combined CSV");
            AggregateOutcome::Failed(e.to_string())
        }
    }
}

/// Per-profile output file for `profile`: `<base>_<profile>.csv` in `work_dir`.
pub fn per_profile_output(work_dir: &Path, base: &str, profile: &Profile) -> PathBuf {
    let name = format!("{}_{}.csv", base, profile);
    if work_dir == Path::new(".") {
        PathBuf::from(name)
    } else {
        work_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanStatus;
    use std::time::Duration;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn result(profile: &str, status: ScanStatus, rows: Vec<Vec<String>>) -> ScanResult {
        ScanResult {
            profile: profile.into(),
            status,
            rows,
            diagnostics: String::new(),
            artifact: PathBuf::from(format!("temp_{}.csv", profile)),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_combines_in_profile_order() {
        let results = vec![
            result("p1", ScanStatus::Success, vec![row(&["h"]), row(&["r1"]), row(&["r2"])]),
            result("p2", ScanStatus::Success, vec![row(&["h"]), row(&["r3"])]),
        ];
        let combined = CombinedOutput::from_results(&results).unwrap();
        assert_eq!(combined.header, row(&["h"]));
        assert_eq!(combined.rows, vec![row(&["r1"]), row(&["r2"]), row(&["r3"])]);
    }

    #[test]
    fn test_header_only_result_supplies_header() {
        let results = vec![
            result("p1", ScanStatus::Success, vec![row(&["a", "b"])]),
            result("p2", ScanStatus::Success, vec![row(&["a", "b"]), row(&["1", "2"])]),
        ];
        let combined = CombinedOutput::from_results(&results).unwrap();
        assert_eq!(combined.header, row(&["a", "b"]));
        assert_eq!(combined.rows.len(), 1);
    }

    #[test]
    fn test_failed_results_ignored() {
        let results = vec![
            result("bad", ScanStatus::Failure, vec![row(&["x"]), row(&["junk"])]),
            result("good", ScanStatus::Success, vec![row(&["h"]), row(&["ok"])]),
        ];
        let combined = CombinedOutput::from_results(&results).unwrap();
        assert_eq!(combined.header, row(&["h"]));
        assert_eq!(combined.rows, vec![row(&["ok"])]);
    }

    #[test]
    fn test_no_rows_is_none() {
        let results = vec![
            result("a", ScanStatus::Success, vec![]),
            result("b", ScanStatus::Timeout, vec![]),
        ];
        assert!(CombinedOutput::from_results(&results).is_none());
        assert!(CombinedOutput::from_results(&[]).is_none());
    }

    #[test]
    fn test_mismatched_header_rows_appended_as_is() {
        let results = vec![
            result("p1", ScanStatus::Success, vec![row(&["a", "b"]), row(&["1", "2"])]),
            result("p2", ScanStatus::Success, vec![row(&["x", "y", "z"]), row(&["7", "8", "9"])]),
        ];
        let combined = CombinedOutput::from_results(&results).unwrap();
        let csv = String::from_utf8(combined.to_csv_bytes().unwrap()).unwrap();
        assert_eq!(csv, "a,b\n1,2\n7,8,9\n");
    }

    #[test]
    fn test_csv_quoting() {
        let combined = CombinedOutput {
            header: row(&["name", "note"]),
            rows: vec![row(&["db-1", "has, comma"])],
        };
        let csv = String::from_utf8(combined.to_csv_bytes().unwrap()).unwrap();
        assert_eq!(csv, "name,note\ndb-1,\"has, comma\"\n");
    }

    #[tokio::test]
    async fn test_write_combined_no_data_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("combined.csv");
        let outcome = write_combined(&[], &path).await;
        assert_eq!(outcome, AggregateOutcome::NoData);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_combined_missing_parent_reports_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("combined.csv");
        let results = vec![result("p", ScanStatus::Success, vec![row(&["h"]), row(&["1"])])];
        assert!(matches!(write_combined(&results, &path).await, AggregateOutcome::Failed(_)));
    }

    #[test]
    fn test_per_profile_output_names() {
        let profile = Profile::new("prod");
        assert_eq!(per_profile_output(Path::new("."), "analysis", &profile), PathBuf::from("analysis_prod.csv"));
        assert_eq!(
            per_profile_output(Path::new("/srv/scan"), "analysis", &profile),
            PathBuf::from("/srv/scan/analysis_prod.csv")
        );
    }
}
