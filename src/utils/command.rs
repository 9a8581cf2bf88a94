//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{Error, Result};

/// Run a command in a directory and return trimmed stdout on success.
///
/// Returns an error carrying the exit code and stderr (or stdout fallback)
/// if the command exits non-zero.
pub fn run_in(dir: &Path, program: &str, args: &[&str], context: &str) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", context, e),
                Some(context.to_string()),
            )
        })?;

    if !output.status.success() {
        return Err(Error::env_command_failed(
            context,
            output.status.code(),
            error_text(&output),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command in a directory with stdout/stderr inherited from the
/// parent process.
///
/// Used for long-running orchestration commands (lando, composer) whose
/// progress output the operator should see live.
pub fn run_inherit_in(dir: &Path, program: &str, args: &[&str], context: &str) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", context, e),
                Some(context.to_string()),
            )
        })?;

    if !status.success() {
        return Err(Error::env_command_failed(context, status.code(), String::new()));
    }

    Ok(())
}

/// Check if a command succeeds in a directory, discarding all output.
///
/// Useful for readiness probes where failure is expected while a service
/// is still starting.
pub fn succeeded_in(dir: &Path, program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::path::PathBuf;

    fn tmp() -> PathBuf {
        std::env::temp_dir()
    }

    #[test]
    fn run_in_succeeds_with_valid_command() {
        let result = run_in(&tmp(), "echo", &["hello"], "echo test");
        assert_eq!(result.unwrap(), "hello");
    }

    #[test]
    fn run_in_fails_with_missing_program() {
        let result = run_in(&tmp(), "nonexistent_command_xyz", &[], "test");
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalIoError);
    }

    #[test]
    fn run_in_surfaces_exit_code_on_failure() {
        let result = run_in(&tmp(), "false", &[], "false test");
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::EnvCommandFailed);
        assert_eq!(err.details["exitCode"], 1);
    }

    #[test]
    fn run_inherit_in_propagates_failure() {
        let result = run_inherit_in(&tmp(), "false", &[], "false test");
        assert!(result.is_err());
    }

    #[test]
    fn succeeded_in_reports_status() {
        assert!(succeeded_in(&tmp(), "true", &[]));
        assert!(!succeeded_in(&tmp(), "false", &[]));
        assert!(!succeeded_in(&tmp(), "nonexistent_command_xyz", &[]));
    }
}
