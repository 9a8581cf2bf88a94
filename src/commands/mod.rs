pub mod install;
pub mod wipe;

pub type CmdResult<T> = standup::Result<T>;

pub(crate) struct GlobalArgs {
    /// Directory the pipelines operate on. Always the process working
    /// directory in production; tests point it elsewhere.
    pub workdir: std::path::PathBuf,
}

impl GlobalArgs {
    pub fn from_cwd() -> standup::Result<Self> {
        let workdir = std::env::current_dir().map_err(|e| {
            standup::Error::internal_io(e.to_string(), Some("resolve working directory".to_string()))
        })?;
        Ok(Self { workdir })
    }
}
