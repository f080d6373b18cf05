//! Platform-specific configuration paths.

use crate::constants::{APP_NAME, WORKING_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/birdglot/`
/// - macOS: `~/Library/Application Support/birdglot/`
/// - Windows: `%APPDATA%\birdglot\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the path of the canonical working WAV written by ingest.
///
/// One file per platform cache dir, overwritten on each run.
pub fn working_file_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().join(WORKING_FILE_NAME))
        .ok_or(Error::CacheDirNotFound)
}
