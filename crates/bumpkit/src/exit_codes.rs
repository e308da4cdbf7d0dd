//! Exit codes for the CLI

use bumpkit_core::error::{BumpkitError, ConfigError, GitError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Version error
pub const VERSION_ERROR: u8 = 4;

/// Exit code for the first recognised error in the chain
pub fn for_error(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<BumpkitError>() {
            return match e {
                BumpkitError::Config(_) => CONFIG_ERROR,
                BumpkitError::Git(_) => GIT_ERROR,
                BumpkitError::Version(_) => VERSION_ERROR,
                _ => ERROR,
            };
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
    }
    ERROR
}
