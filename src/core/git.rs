use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::{command, io};

/// Check whether the directory contains git metadata.
///
/// A plain filesystem check, deliberately not `git rev-parse`: the repo
/// gate must be decidable without issuing any external command.
pub fn is_git_repo(workdir: &Path) -> bool {
    workdir.join(".git").is_dir()
}

/// Read the checked-out branch name from the branch-reference file.
///
/// Returns `None` for a detached HEAD (no symbolic ref).
pub fn current_branch(workdir: &Path) -> Result<Option<String>> {
    let head = io::read_file(&workdir.join(".git").join("HEAD"), "read git HEAD")?;

    Ok(head
        .trim()
        .strip_prefix("ref: refs/heads/")
        .map(str::to_string))
}

/// Remove untracked files, hard-reset to HEAD and pull the latest commit
/// from the remote tracking branch.
pub fn sync_to_remote(workdir: &Path) -> Result<()> {
    log_status!("git", "Pulling latest changes");

    for args in [
        ["clean", "-fdx"].as_slice(),
        ["reset", "--hard"].as_slice(),
        ["pull"].as_slice(),
    ] {
        command::run_inherit_in(workdir, "git", args, &format!("git {}", args[0]))
            .map_err(|e| Error::git_command_failed(e.to_string()))?;
    }

    Ok(())
}
