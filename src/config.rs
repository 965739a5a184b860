// src/config.rs

//! Configuration loading utilities.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Load configuration from `path` and validate it.
///
/// A missing file means defaults; a file that exists but does not parse is
/// an error.
pub fn load_validated(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        log::debug!("Loading configuration from {}", path.display());
        Config::load(path)?
    } else {
        log::debug!("No configuration at {}, using defaults", path.display());
        Config::default()
    };

    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration in {}: {e}", path.display())))?;
    Ok(config)
}
