use super::types::SweepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments; nothing ran.
    Usage,
    /// Settings or profile configuration could not be loaded.
    Configuration,
    /// A single profile's scanner run failed.
    Execution,
    /// Combining results failed after the batch ran.
    Aggregation,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub category: ErrorCategory,
    pub exit_code: i32,
    pub marker: &'static str,
}

impl SweepError {
    /// Classify this error to pick the process exit code and the marker shown to the user.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            SweepError::Usage(_) => ErrorClassification {
                category: ErrorCategory::Usage,
                exit_code: 2,
                marker: "❌",
            },
            SweepError::NoProfiles => ErrorClassification {
                category: ErrorCategory::Usage,
                exit_code: 2,
                marker: "❌",
            },
            SweepError::FileNotFound(_) => ErrorClassification {
                category: ErrorCategory::Configuration,
                exit_code: 3,
                marker: "❌",
            },
            SweepError::Config(_) => ErrorClassification {
                category: ErrorCategory::Configuration,
                exit_code: 3,
                marker: "❌",
            },
            SweepError::Yaml(_) => ErrorClassification {
                category: ErrorCategory::Configuration,
                exit_code: 3,
                marker: "❌",
            },
            SweepError::Launch(_) => ErrorClassification {
                category: ErrorCategory::Execution,
                exit_code: 1,
                marker: "❌",
            },
            SweepError::Timeout(_) => ErrorClassification {
                category: ErrorCategory::Execution,
                exit_code: 1,
                marker: "⏰",
            },
            SweepError::Csv(_) => ErrorClassification {
                category: ErrorCategory::Aggregation,
                exit_code: 1,
                marker: "⚠️ ",
            },
            SweepError::Io(_) => ErrorClassification {
                category: ErrorCategory::Configuration,
                exit_code: 1,
                marker: "❌",
            },
        }
    }

    /// Fatal errors abort the run before any profile is processed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.classify().category,
            ErrorCategory::Usage | ErrorCategory::Configuration
        )
    }
}
