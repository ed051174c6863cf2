use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCANNER: &str = "deployment-scanner.py";
pub const DEFAULT_INTERPRETER: &str = "python3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_PROFILE_ENV: &str = "AWS_PROFILE";

/// Optional YAML settings file. Every field falls back to a built-in default.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scanner: Option<String>,
    pub interpreter: Option<String>,
    pub timeout_secs: Option<u64>,
    pub profile_env: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub aws_config: Option<PathBuf>,
}

/// Command-line overrides layered on top of [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub scanner: Option<String>,
    pub interpreter: Option<String>,
    pub timeout_secs: Option<u64>,
    pub work_dir: Option<PathBuf>,
    pub aws_config: Option<PathBuf>,
}

/// Fully resolved settings for launching the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    pub scanner: String,
    pub interpreter: String,
    pub timeout: Duration,
    pub profile_env: String,
    /// Scanner working directory; artifacts land here.
    pub work_dir: PathBuf,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            scanner: DEFAULT_SCANNER.to_string(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            profile_env: DEFAULT_PROFILE_ENV.to_string(),
            work_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Layer CLI overrides over file values over defaults.
    pub fn resolve(&self, overrides: &Overrides) -> ExecutionConfig {
        let defaults = ExecutionConfig::default();
        ExecutionConfig {
            scanner: overrides.scanner.clone()
                .or_else(|| self.scanner.clone())
                .unwrap_or(defaults.scanner),
            interpreter: overrides.interpreter.clone()
                .or_else(|| self.interpreter.clone())
                .unwrap_or(defaults.interpreter),
            timeout: overrides.timeout_secs
                .or(self.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            profile_env: self.profile_env.clone().unwrap_or(defaults.profile_env),
            work_dir: overrides.work_dir.clone()
                .or_else(|| self.work_dir.as_deref().map(super::expand_home))
                .unwrap_or(defaults.work_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let cfg = Settings::default().resolve(&Overrides::default());
        assert_eq!(cfg, ExecutionConfig::default());
        assert_eq!(cfg.timeout, Duration::from_secs(300));
        assert_eq!(cfg.profile_env, "AWS_PROFILE");
    }

    #[test]
    fn test_cli_overrides_file() {
        let settings = Settings {
            interpreter: Some("python3.11".into()),
            timeout_secs: Some(60),
            ..Default::default()
        };
        let overrides = Overrides {
            timeout_secs: Some(5),
            ..Default::default()
        };
        let cfg = settings.resolve(&overrides);
        assert_eq!(cfg.interpreter, "python3.11");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.scanner, DEFAULT_SCANNER);
    }
}
