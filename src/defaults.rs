//! Default values for go-bump configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Name of the configuration file inside the workdir.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the directory inside the workdir holding library workspaces.
pub const LIBRARIES_DIR_NAME: &str = "libraries";

/// Branch used as checkout source and merge request target when neither the
/// library nor the configuration names one.
pub const DEFAULT_TARGET_BRANCH: &str = "master";

/// Environment variable holding the hosting platform API token.
pub const API_TOKEN_ENV: &str = "GOBUMP_API_KEY";

/// Returns the default working directory.
///
/// This is `~/.go-bump` on every platform. Falls back to `.go-bump` in the
/// current directory if the home directory cannot be determined.
///
/// This can be overridden by the `--workdir` CLI flag or the
/// `GOBUMP_WORKDIR` environment variable.
pub fn default_workdir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".go-bump"))
        .unwrap_or_else(|| PathBuf::from(".go-bump"))
}

/// Config file location for a given workdir.
pub fn config_path(workdir: &Path) -> PathBuf {
    workdir.join(CONFIG_FILE_NAME)
}

/// Libraries directory for a given workdir.
pub fn libraries_dir(workdir: &Path) -> PathBuf {
    workdir.join(LIBRARIES_DIR_NAME)
}
