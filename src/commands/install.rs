use serde::Serialize;

use standup::defaults::StackConfig;
use standup::log_status;
use standup::install::{self, InstallReport};

use super::{CmdResult, GlobalArgs};

#[derive(Debug, Serialize)]
pub struct InstallOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub report: InstallReport,
}

pub fn run(global: &GlobalArgs) -> CmdResult<InstallOutput> {
    let cfg = StackConfig::default();
    let report = install::run(&global.workdir, &cfg)?;

    log_status!("drush", "Admin login link: {}", report.login_link);

    Ok(InstallOutput {
        command: "install",
        report,
    })
}
