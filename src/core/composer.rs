/// Composer runs inside the container, through the orchestration CLI, so
/// the host needs no PHP toolchain. These build the `lando ...` argument
/// vectors the install pipeline executes.

pub fn install_args() -> Vec<String> {
    vec!["composer".to_string(), "install".to_string()]
}

pub fn require_drush_args() -> Vec<String> {
    vec![
        "composer".to_string(),
        "require".to_string(),
        "drush/drush".to_string(),
    ]
}
