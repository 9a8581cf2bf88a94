use serde::Serialize;

use standup::wipe::{self, WipeReport};

use super::{CmdResult, GlobalArgs};
use crate::tty;

#[derive(Debug, Serialize)]
pub struct WipeOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub report: WipeReport,
}

pub fn run(global: &GlobalArgs) -> CmdResult<WipeOutput> {
    let report = wipe::run(&global.workdir, tty::prompt)?;

    Ok(WipeOutput {
        command: "wipe",
        report,
    })
}
