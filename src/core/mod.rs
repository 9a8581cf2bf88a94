// Public modules
pub mod composer;
pub mod defaults;
pub mod drush;
pub mod error;
pub mod git;
pub mod install;
pub mod lando;
pub mod preflight;
pub mod wipe;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
