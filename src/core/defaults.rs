use serde::{Deserialize, Serialize};
use std::time::Duration;

/// All stack-level settings the pipelines run against.
///
/// The original installer hard-coded every one of these as literals inside
/// the command strings; they are lifted here so each value exists exactly
/// once and the arg builders render from the same source the tests do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Lando app name.
    #[serde(default = "default_stack_name")]
    pub stack_name: String,

    /// Lando provisioning recipe.
    #[serde(default = "default_recipe")]
    pub recipe: String,

    /// Webroot relative to the repository root.
    #[serde(default = "default_webroot")]
    pub webroot: String,

    /// Pinned PHP version for the recipe.
    #[serde(default = "default_php_version")]
    pub php_version: String,

    /// Pinned MySQL version for the recipe.
    #[serde(default = "default_mysql_version")]
    pub mysql_version: String,

    /// Database user, password and schema name. The drupal8 recipe
    /// provisions all three with the same value.
    #[serde(default = "default_db_credentials")]
    pub db_credentials: String,

    /// Database host as seen from inside the app container.
    #[serde(default = "default_db_host")]
    pub db_host: String,

    #[serde(default = "default_db_port")]
    pub db_port: u16,

    /// Drupal installation profile.
    #[serde(default = "default_install_profile")]
    pub install_profile: String,

    #[serde(default = "default_admin_user")]
    pub admin_user: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Local site URL the one-time login link is generated against.
    #[serde(default = "default_site_uri")]
    pub site_uri: String,

    /// Pattern the checked-out branch name must match.
    #[serde(default = "default_branch_pattern")]
    pub expected_branch_pattern: String,

    /// Path of the version marker file, relative to the repository root.
    #[serde(default = "default_version_marker_path")]
    pub version_marker_path: String,

    /// Substring the version marker file must contain.
    #[serde(default = "default_version_marker")]
    pub version_marker: String,

    /// Dependency manifest file, relative to the repository root.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// How long to wait for the database after `lando start`.
    #[serde(default = "default_readiness_timeout_secs")]
    pub readiness_timeout_secs: u64,

    #[serde(default = "default_readiness_interval_secs")]
    pub readiness_interval_secs: u64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: default_stack_name(),
            recipe: default_recipe(),
            webroot: default_webroot(),
            php_version: default_php_version(),
            mysql_version: default_mysql_version(),
            db_credentials: default_db_credentials(),
            db_host: default_db_host(),
            db_port: default_db_port(),
            install_profile: default_install_profile(),
            admin_user: default_admin_user(),
            admin_password: default_admin_password(),
            site_uri: default_site_uri(),
            expected_branch_pattern: default_branch_pattern(),
            version_marker_path: default_version_marker_path(),
            version_marker: default_version_marker(),
            manifest_path: default_manifest_path(),
            readiness_timeout_secs: default_readiness_timeout_secs(),
            readiness_interval_secs: default_readiness_interval_secs(),
        }
    }
}

impl StackConfig {
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }

    pub fn readiness_interval(&self) -> Duration {
        Duration::from_secs(self.readiness_interval_secs)
    }
}

/// Executables that must resolve on PATH before the install pipeline runs.
pub const REQUIRED_EXECUTABLES: &[&str] = &["sudo", "docker", "lando"];

/// Executables that are useful on the host but not required, since the
/// pipeline invokes them inside the container.
pub const OPTIONAL_EXECUTABLES: &[&str] = &["composer"];

fn default_stack_name() -> String {
    "drupal9".to_string()
}

fn default_recipe() -> String {
    "drupal8".to_string()
}

fn default_webroot() -> String {
    ".".to_string()
}

fn default_php_version() -> String {
    "7.3".to_string()
}

fn default_mysql_version() -> String {
    "5.7".to_string()
}

fn default_db_credentials() -> String {
    "drupal8".to_string()
}

fn default_db_host() -> String {
    "database".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_install_profile() -> String {
    "standard".to_string()
}

fn default_admin_user() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_site_uri() -> String {
    "https://drupal9.lndo.site".to_string()
}

fn default_branch_pattern() -> String {
    r"^9\.\d+\.x$".to_string()
}

fn default_version_marker_path() -> String {
    "core/lib/Drupal.php".to_string()
}

fn default_version_marker() -> String {
    "const VERSION = '9".to_string()
}

fn default_manifest_path() -> String {
    "composer.json".to_string()
}

fn default_readiness_timeout_secs() -> u64 {
    30
}

fn default_readiness_interval_secs() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pin_runtime_versions() {
        let cfg = StackConfig::default();
        assert_eq!(cfg.php_version, "7.3");
        assert_eq!(cfg.mysql_version, "5.7");
        assert_eq!(cfg.db_port, 3306);
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let cfg: StackConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.stack_name, "drupal9");
        assert_eq!(cfg.recipe, "drupal8");
        assert_eq!(cfg.site_uri, "https://drupal9.lndo.site");
    }
}
