use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{discover_profiles, resolve_config_path};
use crate::errors::SweepError;
use crate::executor::ArtifactPolicy;
use crate::models::{DateRange, Profile, ProfileSet, ScanRequest};
use crate::reporting::aggregator::per_profile_output;

/// Log file prefix for the scratch CSVs of a combined run.
pub const COMBINED_SCRATCH_PREFIX: &str = "temp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Leave `<log_file_name>_<profile>.csv` per profile.
    PerProfile { log_file_name: String },
    /// Merge every profile into `output_file`.
    Combined { output_file: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    Explicit,
    Discovered(PathBuf),
}

/// Everything decided before the first scanner runs.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub mode: RunMode,
    pub region: String,
    pub date_range: Option<DateRange>,
    pub profiles: ProfileSet,
    pub source: ProfileSource,
    pub work_dir: PathBuf,
}

impl RunPlan {
    pub fn log_file_name(&self, profile: &Profile) -> String {
        match &self.mode {
            RunMode::PerProfile { log_file_name } => format!("{}_{}", log_file_name, profile),
            RunMode::Combined { .. } => format!("{}_{}", COMBINED_SCRATCH_PREFIX, profile),
        }
    }

    pub fn requests(&self) -> Vec<ScanRequest> {
        self.profiles
            .iter()
            .map(|profile| {
                ScanRequest::new(
                    profile.clone(),
                    self.region.clone(),
                    self.date_range.clone(),
                    self.log_file_name(profile),
                )
            })
            .collect()
    }

    pub fn artifact_policy(&self) -> ArtifactPolicy {
        match self.mode {
            RunMode::PerProfile { .. } => ArtifactPolicy::Leave,
            RunMode::Combined { .. } => ArtifactPolicy::Collect,
        }
    }

    /// Output file per profile. Empty in combined mode.
    pub fn per_profile_outputs(&self) -> Vec<(Profile, PathBuf)> {
        match &self.mode {
            RunMode::PerProfile { log_file_name } => self
                .profiles
                .iter()
                .map(|p| (p.clone(), per_profile_output(&self.work_dir, log_file_name, p)))
                .collect(),
            RunMode::Combined { .. } => Vec::new(),
        }
    }
}

/// An explicit `--profiles` list wins; otherwise profiles come from the AWS config file.
/// A blank list counts as no list.
pub async fn resolve_profiles(
    explicit: Option<&str>,
    aws_config: Option<&Path>,
) -> Result<(ProfileSet, ProfileSource), SweepError> {
    let explicit = explicit.filter(|list| !list.trim().is_empty());
    let (profiles, source) = match explicit {
        Some(list) => (ProfileSet::from_list(list), ProfileSource::Explicit),
        None => {
            let path = resolve_config_path(aws_config)?;
            let profiles = discover_profiles(&path).await?;
            (profiles, ProfileSource::Discovered(path))
        }
    };

    if profiles.is_empty() {
        return Err(SweepError::NoProfiles);
    }
    info!(count = profiles.len(), source = ?source, "Resolved profiles");
    Ok((profiles, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(mode: RunMode) -> RunPlan {
        RunPlan {
            mode,
            region: "us-east-1".into(),
            date_range: None,
            profiles: ProfileSet::from_list("prod,dev"),
            source: ProfileSource::Explicit,
            work_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn test_per_profile_log_names() {
        let p = plan(RunMode::PerProfile { log_file_name: "analysis".into() });
        let names: Vec<String> = p.requests().into_iter().map(|r| r.log_file_name).collect();
        assert_eq!(names, vec!["analysis_prod", "analysis_dev"]);
        assert_eq!(p.artifact_policy(), ArtifactPolicy::Leave);
    }

    #[test]
    fn test_combined_uses_scratch_names() {
        let p = plan(RunMode::Combined { output_file: "all.csv".into() });
        let requests = p.requests();
        assert_eq!(requests[0].log_file_name, "temp_prod");
        assert_eq!(requests[1].artifact_name(), "temp_dev.csv");
        assert_eq!(p.artifact_policy(), ArtifactPolicy::Collect);
        assert!(p.per_profile_outputs().is_empty());
    }

    #[test]
    fn test_requests_carry_region_and_dates() {
        let mut p = plan(RunMode::Combined { output_file: "all.csv".into() });
        p.date_range = DateRange::from_pair(Some("20240101"), Some("20240131")).unwrap();
        let request = &p.requests()[0];
        assert_eq!(request.region, "us-east-1");
        assert_eq!(request.date_range.as_ref().unwrap().start, "20240101");
    }

    #[tokio::test]
    async fn test_explicit_list_skips_discovery() {
        // Config path does not exist; discovery would fail if it ran
        let (profiles, source) = resolve_profiles(Some("a,b,c"), Some(Path::new("/no/such/config")))
            .await
            .unwrap();
        assert_eq!(profiles.names(), vec!["a", "b", "c"]);
        assert_eq!(source, ProfileSource::Explicit);
    }

    #[tokio::test]
    async fn test_empty_explicit_list_is_fatal() {
        let err = resolve_profiles(Some(" , "), None).await.unwrap_err();
        assert!(matches!(err, SweepError::NoProfiles));
    }

    #[tokio::test]
    async fn test_blank_explicit_list_falls_back_to_discovery() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("config");
        std::fs::write(&config, "[default]\n[profile ops]\n").unwrap();

        let (profiles, source) = resolve_profiles(Some(""), Some(&config)).await.unwrap();
        assert_eq!(profiles.names(), vec!["ops", "default"]);
        assert_eq!(source, ProfileSource::Discovered(config));
    }

    #[tokio::test]
    async fn test_unreadable_config_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = resolve_profiles(None, Some(dir.path())).await.unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_discovery_missing_file_is_fatal() {
        let err = resolve_profiles(None, Some(Path::new("/no/such/config"))).await.unwrap_err();
        assert!(matches!(err, SweepError::FileNotFound(_)));
    }
}
