use crate::errors::SweepError;
use super::profile::Profile;

/// Historical usage window passed through to the scanner.
///
/// Dates are forwarded verbatim; calendar validation is left to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Build from the optional `--start-date`/`--end-date` pair.
    /// Both or neither must be given.
    pub fn from_pair(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, SweepError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(Self {
                start: start.to_string(),
                end: end.to_string(),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(SweepError::Usage(
                "Must provide --end-date when providing --start-date".into(),
            )),
            (None, Some(_)) => Err(SweepError::Usage(
                "Must provide --start-date when providing --end-date".into(),
            )),
        }
    }
}

/// One scanner invocation for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub profile: Profile,
    pub region: String,
    pub date_range: Option<DateRange>,
    /// Passed as `--log-file-name`; the scanner writes `<log_file_name>.csv`.
    pub log_file_name: String,
}

impl ScanRequest {
    pub fn new(
        profile: Profile,
        region: impl Into<String>,
        date_range: Option<DateRange>,
        log_file_name: impl Into<String>,
    ) -> Self {
        Self {
            profile,
            region: region.into(),
            date_range,
            log_file_name: log_file_name.into(),
        }
    }

    /// Scanner arguments, in the order the scanner expects them.
    pub fn scanner_args(&self) -> Vec<String> {
        let mut args = vec![
            "--region".to_string(),
            self.region.clone(),
            "--log-file-name".to_string(),
            self.log_file_name.clone(),
        ];
        if let Some(range) = &self.date_range {
            args.extend([
                "--start-date".to_string(),
                range.start.clone(),
                "--end-date".to_string(),
                range.end.clone(),
            ]);
        }
        args
    }

    pub fn artifact_name(&self) -> String {
        format!("{}.csv", self.log_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_pair_both_present() {
        let range = DateRange::from_pair(Some("20240101"), Some("20240131")).unwrap();
        assert_eq!(range.unwrap().end, "20240131");
    }

    #[test]
    fn test_date_pair_neither() {
        assert!(DateRange::from_pair(None, None).unwrap().is_none());
    }

    #[test]
    fn test_start_without_end_is_usage_error() {
        let err = DateRange::from_pair(Some("20240101"), None).unwrap_err();
        assert!(matches!(err, SweepError::Usage(_)));
        assert!(err.to_string().contains("--end-date"));
    }

    #[test]
    fn test_end_without_start_is_usage_error() {
        let err = DateRange::from_pair(None, Some("20240131")).unwrap_err();
        assert!(err.to_string().contains("--start-date"));
    }

    #[test]
    fn test_dates_not_calendar_checked() {
        assert!(DateRange::from_pair(Some("20241399"), Some("garbage")).is_ok());
    }

    #[test]
    fn test_scanner_args_without_dates() {
        let req = ScanRequest::new("prod".into(), "us-east-1", None, "analysis_prod");
        assert_eq!(
            req.scanner_args(),
            vec!["--region", "us-east-1", "--log-file-name", "analysis_prod"]
        );
        assert_eq!(req.artifact_name(), "analysis_prod.csv");
    }

    #[test]
    fn test_scanner_args_with_dates() {
        let range = DateRange::from_pair(Some("20240101"), Some("20240131")).unwrap();
        let req = ScanRequest::new("dev".into(), "eu-west-1", range, "temp_dev");
        let args = req.scanner_args();
        assert_eq!(&args[4..], &["--start-date", "20240101", "--end-date", "20240131"]);
    }
}
