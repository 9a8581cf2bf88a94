use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::git;
use crate::lando;
use crate::utils::command;

pub const VENDOR_DIR: &str = "vendor";
pub const DEFAULT_SITE_DIR: &str = "sites/default";

const DESTROY_PROMPT: &str =
    "WARNING: This will completely destroy the Lando app. Are you sure? (y/n) ";
const CLEANUP_PROMPT: &str =
    "WARNING: This will reset your Git repo and pull the latest commit in HEAD. Are you sure? (y/n) ";

/// Operator answer to a yes/no prompt. Only the exact strings `y` and `n`
/// are accepted; there is no retry on bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Invalid,
}

impl Confirmation {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "y" => Confirmation::Yes,
            "n" => Confirmation::No,
            _ => Confirmation::Invalid,
        }
    }
}

/// Destructive actions the wipe pipeline can take on the host.
///
/// Same seam shape as the install runner: production shells out, tests
/// record.
pub trait WipeEnv {
    fn destroy_app(&mut self) -> Result<()>;
    fn remove_vendor(&mut self) -> Result<()>;
    fn remove_default_site(&mut self) -> Result<()>;
    fn sync_git(&mut self) -> Result<()>;
}

pub struct HostEnv<'a> {
    workdir: &'a Path,
}

impl<'a> HostEnv<'a> {
    pub fn new(workdir: &'a Path) -> Self {
        Self { workdir }
    }
}

impl WipeEnv for HostEnv<'_> {
    fn destroy_app(&mut self) -> Result<()> {
        let args: Vec<String> = lando::destroy_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        command::run_inherit_in(self.workdir, "lando", &args, "lando destroy")
    }

    fn remove_vendor(&mut self) -> Result<()> {
        fs::remove_dir_all(self.workdir.join(VENDOR_DIR))
            .map_err(|e| Error::internal_io(e.to_string(), Some("remove vendor".to_string())))
    }

    fn remove_default_site(&mut self) -> Result<()> {
        // The installer leaves read-only files under sites/default, so an
        // ordinary recursive delete fails partway through.
        let target = self.workdir.join(DEFAULT_SITE_DIR);
        let target = target.to_string_lossy();
        command::run_inherit_in(
            self.workdir,
            "sudo",
            &["rm", "-Rf", &target],
            "sudo rm sites/default",
        )
    }

    fn sync_git(&mut self) -> Result<()> {
        git::sync_to_remote(self.workdir)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeReport {
    pub destroyed: bool,
    pub cancelled: bool,
    pub removed_vendor: bool,
    pub removed_default_site: bool,
    pub git_synced: bool,
}

/// Wipe pipeline against the real host.
pub fn run(workdir: &Path, prompt: impl FnMut(&str) -> Result<String>) -> Result<WipeReport> {
    run_with(workdir, prompt, &mut HostEnv::new(workdir))
}

/// Two single-shot confirmations, each gating its own destructive block.
/// A malformed answer to either prompt ends the whole operation.
pub fn run_with(
    workdir: &Path,
    mut prompt: impl FnMut(&str) -> Result<String>,
    env: &mut impl WipeEnv,
) -> Result<WipeReport> {
    let answer = prompt(DESTROY_PROMPT)?;
    match Confirmation::parse(&answer) {
        Confirmation::Yes => {
            log_status!("wipe", "Deleting app");
            env.destroy_app()?;
        }
        // The first prompt has no cancel path: anything but an explicit
        // yes is rejected outright, matching the original installer.
        Confirmation::No | Confirmation::Invalid => {
            return Err(Error::prompt_invalid_input());
        }
    }

    let mut report = WipeReport {
        destroyed: true,
        cancelled: false,
        removed_vendor: false,
        removed_default_site: false,
        git_synced: false,
    };

    let answer = prompt(CLEANUP_PROMPT)?;
    match Confirmation::parse(&answer) {
        Confirmation::Yes => {}
        Confirmation::No => {
            log_status!("wipe", "Operation cancelled by user");
            report.cancelled = true;
            return Ok(report);
        }
        Confirmation::Invalid => {
            return Err(Error::prompt_invalid_input());
        }
    }

    let vendor = workdir.join(VENDOR_DIR);
    if vendor.is_dir() {
        log_status!("wipe", "Deleting {} directory", vendor.display());
        env.remove_vendor()?;
        report.removed_vendor = true;
    } else {
        log_status!("wipe", "The {} path doesn't exist. Skipping.", vendor.display());
    }

    let default_site = workdir.join(DEFAULT_SITE_DIR);
    if default_site.is_dir() {
        log_status!("wipe", "Deleting {} directory", default_site.display());
        env.remove_default_site()?;
        report.removed_default_site = true;
    } else {
        log_status!(
            "wipe",
            "The {} path doesn't exist. Skipping.",
            default_site.display()
        );
    }

    env.sync_git()?;
    report.git_synced = true;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingEnv {
        actions: Vec<&'static str>,
    }

    impl WipeEnv for RecordingEnv {
        fn destroy_app(&mut self) -> Result<()> {
            self.actions.push("destroy");
            Ok(())
        }

        fn remove_vendor(&mut self) -> Result<()> {
            self.actions.push("remove vendor");
            Ok(())
        }

        fn remove_default_site(&mut self) -> Result<()> {
            self.actions.push("remove default site");
            Ok(())
        }

        fn sync_git(&mut self) -> Result<()> {
            self.actions.push("sync git");
            Ok(())
        }
    }

    fn scripted(answers: &[&str]) -> impl FnMut(&str) -> Result<String> {
        let answers: Vec<String> = answers.iter().map(|s| s.to_string()).collect();
        let mut next = 0;
        move |_msg: &str| {
            let answer = answers.get(next).cloned().unwrap_or_default();
            next += 1;
            Ok(answer)
        }
    }

    #[test]
    fn parse_accepts_only_exact_answers() {
        assert_eq!(Confirmation::parse("y"), Confirmation::Yes);
        assert_eq!(Confirmation::parse("n"), Confirmation::No);
        assert_eq!(Confirmation::parse(""), Confirmation::Invalid);
        assert_eq!(Confirmation::parse("Y"), Confirmation::Invalid);
        assert_eq!(Confirmation::parse("yes"), Confirmation::Invalid);
    }

    #[test]
    fn empty_first_answer_aborts_before_destroy() {
        let dir = TempDir::new().unwrap();
        let mut env = RecordingEnv::default();

        let err = run_with(dir.path(), scripted(&[""]), &mut env).unwrap_err();
        assert_eq!(err.code, ErrorCode::PromptInvalidInput);
        assert!(env.actions.is_empty());
    }

    #[test]
    fn no_on_first_prompt_is_rejected_as_invalid() {
        let dir = TempDir::new().unwrap();
        let mut env = RecordingEnv::default();

        let err = run_with(dir.path(), scripted(&["n"]), &mut env).unwrap_err();
        assert_eq!(err.code, ErrorCode::PromptInvalidInput);
        assert!(env.actions.is_empty());
    }

    #[test]
    fn cancel_on_second_prompt_destroys_but_cleans_nothing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(VENDOR_DIR)).unwrap();
        let mut env = RecordingEnv::default();

        let report = run_with(dir.path(), scripted(&["y", "n"]), &mut env).unwrap();

        assert_eq!(env.actions, vec!["destroy"]);
        assert!(report.destroyed);
        assert!(report.cancelled);
        assert!(!report.removed_vendor);
        assert!(!report.git_synced);
        assert!(dir.path().join(VENDOR_DIR).is_dir());
    }

    #[test]
    fn full_wipe_runs_every_action_once() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(VENDOR_DIR)).unwrap();
        fs::create_dir_all(dir.path().join(DEFAULT_SITE_DIR)).unwrap();
        let mut env = RecordingEnv::default();

        let report = run_with(dir.path(), scripted(&["y", "y"]), &mut env).unwrap();

        assert_eq!(
            env.actions,
            vec!["destroy", "remove vendor", "remove default site", "sync git"]
        );
        assert!(report.removed_vendor);
        assert!(report.removed_default_site);
        assert!(report.git_synced);
        assert!(!report.cancelled);
    }

    #[test]
    fn missing_directories_are_skipped_but_git_still_syncs() {
        let dir = TempDir::new().unwrap();
        let mut env = RecordingEnv::default();

        let report = run_with(dir.path(), scripted(&["y", "y"]), &mut env).unwrap();

        assert_eq!(env.actions, vec!["destroy", "sync git"]);
        assert!(!report.removed_vendor);
        assert!(!report.removed_default_site);
        assert!(report.git_synced);
    }

    #[test]
    fn invalid_second_answer_aborts_after_destroy() {
        let dir = TempDir::new().unwrap();
        let mut env = RecordingEnv::default();

        let err = run_with(dir.path(), scripted(&["y", "maybe"]), &mut env).unwrap_err();
        assert_eq!(err.code, ErrorCode::PromptInvalidInput);
        assert_eq!(env.actions, vec!["destroy"]);
    }
}
