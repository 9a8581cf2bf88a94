//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use serde::Serialize;
use standup::error::Hint;
use standup::{Error, ErrorCode, Result};

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal_io(e.to_string(), Some("serialize response".to_string())))
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_result<T: Serialize>(result: &Result<T>) {
    let outcome = match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(err)),
    };

    if let Err(err) = outcome {
        eprintln!("{}", err);
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::PromptInvalidInput => 2,

        ErrorCode::ToolingMissingExecutable
        | ErrorCode::RepoNotGitRepository
        | ErrorCode::RepoBranchMismatch
        | ErrorCode::RepoVersionMarkerMissing
        | ErrorCode::RepoVersionMarkerInvalid
        | ErrorCode::ManifestMissing => 4,

        ErrorCode::EnvCommandFailed
        | ErrorCode::EnvDatabaseNotReady
        | ErrorCode::GitCommandFailed => 20,

        ErrorCode::InternalIoError | ErrorCode::InternalUnexpected => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_failures_share_an_exit_code() {
        assert_eq!(exit_code_for_error(ErrorCode::RepoNotGitRepository), 4);
        assert_eq!(exit_code_for_error(ErrorCode::ManifestMissing), 4);
    }

    #[test]
    fn error_envelope_carries_code_and_details() {
        let err = Error::tooling_missing_executable("docker");
        let response = CliResponse::from_error(&err);
        let error = response.error.unwrap();
        assert_eq!(error.code, "tooling.missing_executable");
        assert_eq!(error.details["executable"], "docker");
    }
}
