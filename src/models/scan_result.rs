use std::path::PathBuf;
use std::time::Duration;

use super::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Success,
    Failure,
    Timeout,
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// Outcome of running the scanner for one profile.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub profile: Profile,
    pub status: ScanStatus,
    /// CSV records read back from the artifact, header first. Empty unless collected.
    pub rows: Vec<Vec<String>>,
    /// Captured stderr or the error text for failed runs.
    pub diagnostics: String,
    /// Where the scanner's CSV was expected.
    pub artifact: PathBuf,
    pub elapsed: Duration,
}

impl ScanResult {
    pub fn succeeded(&self) -> bool {
        self.status == ScanStatus::Success
    }

    /// Data rows, i.e. everything after the header row.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rows: Vec<Vec<String>>) -> ScanResult {
        ScanResult {
            profile: "p".into(),
            status: ScanStatus::Success,
            rows,
            diagnostics: String::new(),
            artifact: PathBuf::from("temp_p.csv"),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_data_rows_skips_header() {
        let r = result(vec![vec!["h".into()], vec!["1".into()], vec!["2".into()]]);
        assert_eq!(r.data_rows().len(), 2);
        assert_eq!(r.data_rows()[0], vec!["1".to_string()]);
    }

    #[test]
    fn test_data_rows_empty_and_header_only() {
        assert!(result(vec![]).data_rows().is_empty());
        assert!(result(vec![vec!["h".into()]]).data_rows().is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ScanStatus::Timeout.to_string(), "timeout");
    }
}
