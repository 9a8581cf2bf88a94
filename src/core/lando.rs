use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::defaults::StackConfig;
use crate::error::{Error, Result};
use crate::utils::io;

pub const CONFIG_FILE: &str = ".lando.yml";

/// Identity fields of a Lando configuration file.
///
/// Only used to read back an existing file; writes always go through
/// `render_config`, which must stay byte-exact. The pinned versions are
/// not modeled here: YAML parses `7.3` as a number, and nothing needs
/// them after the file exists.
#[derive(Debug, Serialize, Deserialize)]
pub struct LandoFile {
    pub name: String,
    pub recipe: String,
}

/// Outcome of the ensure-config-file step, reported in the install result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigFileStatus {
    Created,
    AlreadyExists,
}

/// Render the Lando configuration file contents.
///
/// Kept as a literal template rather than serialized through serde_yml:
/// the file the operator ends up with must match this text exactly,
/// whitespace included.
pub fn render_config(cfg: &StackConfig) -> String {
    format!(
        "name: {}\nrecipe: {}\nconfig:\n  webroot: {}\n  php: {}\n  mysql: {}\n",
        cfg.stack_name, cfg.recipe, cfg.webroot, cfg.php_version, cfg.mysql_version
    )
}

/// Write the Lando configuration file if absent; an existing file is left
/// byte-for-byte untouched.
pub fn ensure_config_file(workdir: &Path, cfg: &StackConfig) -> Result<ConfigFileStatus> {
    let path = workdir.join(CONFIG_FILE);

    if path.is_file() {
        // Surface whose stack the existing file describes, if it parses.
        let existing = io::read_file(&path, "read lando config")?;
        match serde_yml::from_str::<LandoFile>(&existing) {
            Ok(parsed) => log_status!(
                "lando",
                "Configuration file already exists (app '{}')",
                parsed.name
            ),
            Err(_) => log_status!("lando", "Configuration file already exists"),
        }
        return Ok(ConfigFileStatus::AlreadyExists);
    }

    log_status!(
        "lando",
        "Creating configuration file (PHP {} / MySQL {})",
        cfg.php_version,
        cfg.mysql_version
    );
    io::write_file(&path, &render_config(cfg), "write lando config")?;
    Ok(ConfigFileStatus::Created)
}

pub fn start_args() -> Vec<String> {
    vec!["start".to_string()]
}

pub fn destroy_args() -> Vec<String> {
    vec!["destroy".to_string(), "-y".to_string()]
}

/// Lightweight connectivity check against the database service, issued
/// through the orchestration CLI.
pub fn db_probe_args() -> Vec<String> {
    vec!["mysql".to_string(), "-e".to_string(), "SELECT 1".to_string()]
}

/// Wait for the database to accept connections after `lando start`.
///
/// The original slept a flat 5 seconds and hoped; this polls the probe
/// up to a timeout and fails loudly when the service never comes up.
/// Returns the number of attempts made.
pub fn wait_for_database(
    mut probe: impl FnMut() -> bool,
    timeout: Duration,
    interval: Duration,
) -> Result<u32> {
    let deadline = Instant::now() + timeout;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if probe() {
            log_status!("lando", "Database reachable after {} probe(s)", attempts);
            return Ok(attempts);
        }

        if Instant::now() >= deadline {
            return Err(Error::env_database_not_ready(attempts, timeout.as_secs()));
        }

        std::thread::sleep(interval);
    }
}
