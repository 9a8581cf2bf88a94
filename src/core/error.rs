use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ToolingMissingExecutable,

    RepoNotGitRepository,
    RepoBranchMismatch,
    RepoVersionMarkerMissing,
    RepoVersionMarkerInvalid,

    ManifestMissing,

    PromptInvalidInput,

    EnvCommandFailed,
    EnvDatabaseNotReady,

    GitCommandFailed,

    InternalIoError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ToolingMissingExecutable => "tooling.missing_executable",

            ErrorCode::RepoNotGitRepository => "repo.not_git_repository",
            ErrorCode::RepoBranchMismatch => "repo.branch_mismatch",
            ErrorCode::RepoVersionMarkerMissing => "repo.version_marker_missing",
            ErrorCode::RepoVersionMarkerInvalid => "repo.version_marker_invalid",

            ErrorCode::ManifestMissing => "manifest.missing",

            ErrorCode::PromptInvalidInput => "prompt.invalid_input",

            ErrorCode::EnvCommandFailed => "env.command_failed",
            ErrorCode::EnvDatabaseNotReady => "env.database_not_ready",

            ErrorCode::GitCommandFailed => "git.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingExecutableDetails {
    pub executable: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchMismatchDetails {
    pub branch: String,
    pub expected_pattern: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMarkerDetails {
    pub path: String,
    pub marker: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseNotReadyDetails {
    pub attempts: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn tooling_missing_executable(executable: impl Into<String>) -> Self {
        let executable = executable.into();
        let details = serde_json::to_value(MissingExecutableDetails {
            executable: executable.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ToolingMissingExecutable,
            format!("'{}' is required to run this application", executable),
            details,
        )
        .with_hint(format!("Install '{}' and make sure it is on PATH", executable))
    }

    pub fn repo_not_git_repository(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(PathDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RepoNotGitRepository,
            "This doesn't seem to be a Git repository",
            details,
        )
    }

    pub fn repo_branch_mismatch(
        branch: impl Into<String>,
        expected_pattern: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(BranchMismatchDetails {
            branch: branch.into(),
            expected_pattern: expected_pattern.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RepoBranchMismatch,
            "Checked-out branch does not look like a Drupal 9 development branch",
            details,
        )
    }

    pub fn repo_version_marker_missing(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(PathDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RepoVersionMarkerMissing,
            "This doesn't seem to be a Drupal 9 codebase",
            details,
        )
    }

    pub fn repo_version_marker_invalid(path: impl Into<String>, marker: impl Into<String>) -> Self {
        let details = serde_json::to_value(VersionMarkerDetails {
            path: path.into(),
            marker: marker.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RepoVersionMarkerInvalid,
            "Version marker file does not identify a Drupal 9 codebase",
            details,
        )
    }

    pub fn manifest_missing(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(PathDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ManifestMissing,
            "There doesn't seem to be a composer.json file",
            details,
        )
    }

    pub fn prompt_invalid_input() -> Self {
        Self::new(
            ErrorCode::PromptInvalidInput,
            "You must enter y/n (Yes or No)",
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn env_command_failed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(CommandFailedDetails {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::EnvCommandFailed, "Environment command failed", details)
    }

    pub fn env_database_not_ready(attempts: u32, timeout_secs: u64) -> Self {
        let details = serde_json::to_value(DatabaseNotReadyDetails {
            attempts,
            timeout_secs,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::EnvDatabaseNotReady,
            "Database did not become reachable before the timeout",
            details,
        )
        .with_hint("Check 'lando logs -s database' for startup errors")
    }

    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::GitCommandFailed,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dotted_strings() {
        assert_eq!(
            ErrorCode::ToolingMissingExecutable.as_str(),
            "tooling.missing_executable"
        );
        assert_eq!(ErrorCode::EnvDatabaseNotReady.as_str(), "env.database_not_ready");
    }

    #[test]
    fn missing_executable_carries_name_in_details() {
        let err = Error::tooling_missing_executable("lando");
        assert_eq!(err.code, ErrorCode::ToolingMissingExecutable);
        assert_eq!(err.details["executable"], "lando");
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn prompt_invalid_input_has_empty_details() {
        let err = Error::prompt_invalid_input();
        assert_eq!(err.code, ErrorCode::PromptInvalidInput);
        assert!(err.details.as_object().unwrap().is_empty());
    }
}
