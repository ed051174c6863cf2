use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::errors::SweepError;
use crate::models::{Profile, ProfileSet};

pub const AWS_CONFIG_ENV: &str = "AWS_CONFIG_FILE";

fn section_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^\[(?:profile\s+)?([^\]\n]+)\]").expect("section pattern is valid")
    })
}

/// Extract profile names from AWS config text.
///
/// Sections are `[name]` or `[profile name]` at the start of a line. Names are
/// trimmed and de-duplicated; `default`, wherever it appears, goes last.
pub fn parse_profiles(content: &str) -> ProfileSet {
    let mut profiles = ProfileSet::new();
    let mut has_default = false;

    for caps in section_pattern().captures_iter(content) {
        let name = caps[1].trim();
        if name == Profile::DEFAULT {
            has_default = true;
        } else {
            profiles.push(Profile::new(name));
        }
    }

    if has_default {
        profiles.push(Profile::new(Profile::DEFAULT));
    }
    profiles
}

/// Read and parse the profile configuration file.
pub async fn discover_profiles(path: &Path) -> Result<ProfileSet, SweepError> {
    if !path.exists() {
        return Err(SweepError::FileNotFound(path.to_path_buf()));
    }

    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        SweepError::Config(format!("Error reading AWS config file {}: {}", path.display(), e))
    })?;
    let profiles = parse_profiles(&content);
    info!(path = %path.display(), count = profiles.len(), "Discovered profiles");
    Ok(profiles)
}

/// Locate the AWS config file: explicit path, then `AWS_CONFIG_FILE`, then `~/.aws/config`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, SweepError> {
    if let Some(path) = explicit {
        return Ok(super::expand_home(path));
    }
    if let Ok(from_env) = std::env::var(AWS_CONFIG_ENV) {
        if !from_env.trim().is_empty() {
            debug!(var = AWS_CONFIG_ENV, "Using AWS config location from environment");
            return Ok(super::expand_home(Path::new(&from_env)));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".aws").join("config"))
        .ok_or_else(|| SweepError::Config("Could not determine home directory".into()))
}
