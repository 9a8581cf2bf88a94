use std::path::Path;

use regex::Regex;

use crate::defaults::StackConfig;
use crate::error::{Error, Result};
use crate::git;
use crate::utils::io;

/// Check that every required executable resolves on PATH.
pub fn check_tooling(required: &[&str], optional: &[&str]) -> Result<()> {
    for executable in required {
        if which::which(executable).is_err() {
            return Err(Error::tooling_missing_executable(*executable));
        }
    }

    for executable in optional {
        if which::which(executable).is_err() {
            log_status!(
                "preflight",
                "'{}' not found on PATH; continuing, it is only invoked inside the container",
                executable
            );
        }
    }

    Ok(())
}

/// Check that the working directory is a git repository on an expected
/// development branch.
///
/// The branch name comes from the branch-reference file, not from a git
/// invocation, so this gate cannot issue external commands.
pub fn check_git_repo(workdir: &Path, cfg: &StackConfig) -> Result<()> {
    if !git::is_git_repo(workdir) {
        return Err(Error::repo_not_git_repository(workdir.display().to_string()));
    }
    log_status!("preflight", "Git repository detected");

    let pattern = Regex::new(&cfg.expected_branch_pattern)
        .map_err(|e| Error::internal_unexpected(format!("invalid branch pattern: {}", e)))?;

    let branch = git::current_branch(workdir)?;
    match branch {
        Some(ref name) if pattern.is_match(name) => {
            log_status!("preflight", "On development branch '{}'", name);
            Ok(())
        }
        Some(name) => Err(Error::repo_branch_mismatch(name, &cfg.expected_branch_pattern)),
        None => Err(Error::repo_branch_mismatch(
            "(detached HEAD)",
            &cfg.expected_branch_pattern,
        )),
    }
}

/// Check that the version marker file exists and identifies the expected
/// application version.
pub fn check_version_marker(workdir: &Path, cfg: &StackConfig) -> Result<()> {
    let path = workdir.join(&cfg.version_marker_path);

    if !path.is_file() {
        return Err(Error::repo_version_marker_missing(path.display().to_string()));
    }

    let contents = io::read_file(&path, "read version marker")?;
    if !contents.contains(&cfg.version_marker) {
        return Err(Error::repo_version_marker_invalid(
            path.display().to_string(),
            &cfg.version_marker,
        ));
    }

    log_status!("preflight", "Drupal 9 codebase detected");
    Ok(())
}

/// Check that the dependency manifest exists.
pub fn check_manifest(workdir: &Path, cfg: &StackConfig) -> Result<()> {
    let path = workdir.join(&cfg.manifest_path);

    if !path.is_file() {
        return Err(Error::manifest_missing(path.display().to_string()));
    }

    log_status!("preflight", "{} detected", cfg.manifest_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn drupal9_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/9.0.x\n").unwrap();
        fs::create_dir_all(dir.path().join("core/lib")).unwrap();
        fs::write(
            dir.path().join("core/lib/Drupal.php"),
            "<?php\nclass Drupal {\n  const VERSION = '9.0.0-dev';\n}\n",
        )
        .unwrap();
        fs::write(dir.path().join("composer.json"), "{}").unwrap();
        dir
    }

    #[test]
    fn check_tooling_fails_on_missing_required() {
        let err = check_tooling(&["definitely-not-a-real-tool-xyz"], &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ToolingMissingExecutable);
    }

    #[test]
    fn check_tooling_tolerates_missing_optional() {
        assert!(check_tooling(&[], &["definitely-not-a-real-tool-xyz"]).is_ok());
    }

    #[test]
    fn gates_pass_for_complete_repo() {
        let dir = drupal9_repo();
        let cfg = StackConfig::default();
        // Tooling gate not covered here; host PATH contents are not ours to assume.
        assert!(check_git_repo(dir.path(), &cfg).is_ok());
        assert!(check_version_marker(dir.path(), &cfg).is_ok());
        assert!(check_manifest(dir.path(), &cfg).is_ok());
    }

    #[test]
    fn check_git_repo_fails_without_metadata() {
        let dir = TempDir::new().unwrap();
        let err = check_git_repo(dir.path(), &StackConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RepoNotGitRepository);
    }

    #[test]
    fn check_git_repo_fails_on_branch_mismatch() {
        let dir = drupal9_repo();
        fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/feature/foo\n").unwrap();
        let err = check_git_repo(dir.path(), &StackConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RepoBranchMismatch);
        assert_eq!(err.details["branch"], "feature/foo");
    }

    #[test]
    fn check_git_repo_fails_on_detached_head() {
        let dir = drupal9_repo();
        fs::write(
            dir.path().join(".git/HEAD"),
            "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3\n",
        )
        .unwrap();
        let err = check_git_repo(dir.path(), &StackConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RepoBranchMismatch);
    }

    #[test]
    fn check_version_marker_distinguishes_missing_from_invalid() {
        let dir = drupal9_repo();
        let cfg = StackConfig::default();

        fs::write(dir.path().join("core/lib/Drupal.php"), "const VERSION = '8.9.0';").unwrap();
        let err = check_version_marker(dir.path(), &cfg).unwrap_err();
        assert_eq!(err.code, ErrorCode::RepoVersionMarkerInvalid);

        fs::remove_file(dir.path().join("core/lib/Drupal.php")).unwrap();
        let err = check_version_marker(dir.path(), &cfg).unwrap_err();
        assert_eq!(err.code, ErrorCode::RepoVersionMarkerMissing);
    }

    #[test]
    fn check_manifest_fails_when_absent() {
        let dir = drupal9_repo();
        fs::remove_file(dir.path().join("composer.json")).unwrap();
        let err = check_manifest(dir.path(), &StackConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ManifestMissing);
    }
}
