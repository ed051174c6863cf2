use std::path::Path;
use crate::errors::SweepError;
use super::types::Settings;
use tracing::debug;

const MAX_SETTINGS_BYTES: u64 = 1_048_576;

pub async fn parse_settings(path: &Path) -> Result<Settings, SweepError> {
    if !path.exists() {
        return Err(SweepError::Config(format!("Settings file not found: {}", path.display())));
    }

    let read_error = |e: std::io::Error| {
        SweepError::Config(format!("Error reading settings file {}: {}", path.display(), e))
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    if metadata.len() > MAX_SETTINGS_BYTES {
        return Err(SweepError::Config("Settings file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await.map_err(read_error)?;
    let settings = parse_settings_str(&content)?;
    debug!(path = %path.display(), "Loaded settings file");
    Ok(settings)
}

pub fn parse_settings_str(content: &str) -> Result<Settings, SweepError> {
    // An empty document deserializes to null
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(content)?;
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<(), SweepError> {
    if settings.timeout_secs == Some(0) {
        return Err(SweepError::Config("timeout_secs must be greater than zero".into()));
    }

    let non_empty = [
        ("scanner", &settings.scanner),
        ("interpreter", &settings.interpreter),
        ("profile_env", &settings.profile_env),
    ];
    for (field, value) in non_empty {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(SweepError::Config(format!("{} must not be empty", field)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_settings() {
        let yaml = "scanner: scan.py\ninterpreter: python3.12\ntimeout_secs: 120\nprofile_env: AWS_PROFILE\nwork_dir: /opt/scanner\n";
        let settings = parse_settings_str(yaml).unwrap();
        assert_eq!(settings.scanner.as_deref(), Some("scan.py"));
        assert_eq!(settings.timeout_secs, Some(120));
        assert_eq!(settings.work_dir, Some(PathBuf::from("/opt/scanner")));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_settings_str("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = parse_settings_str("timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
    }

    #[test]
    fn test_blank_interpreter_rejected() {
        assert!(parse_settings_str("interpreter: \"  \"\n").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_settings_str("retries: 3\n").unwrap_err();
        assert!(matches!(err, SweepError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_missing_settings_file() {
        let err = parse_settings(Path::new("/definitely/not/here.yaml")).await.unwrap_err();
        assert!(err.to_string().contains("Settings file not found"));
    }

    #[tokio::test]
    async fn test_unreadable_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = parse_settings(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Error reading settings file"));
        assert_eq!(err.classify().exit_code, 3);
    }
}
