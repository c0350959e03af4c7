//! # Error Suggestions
//!
//! Helpers building operator-facing errors that say what went wrong and how
//! to fix it. Used by the CLI layer, which reports errors through `anyhow`.

use std::path::Path;

use crate::defaults::{API_TOKEN_ENV, CONFIG_FILE_NAME};

/// Generate an error for when the configuration file is not found.
///
/// Includes hints about:
/// - Creating the file in the working directory
/// - Using the --workdir and --config flags
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create {file} listing the libraries to manage\n\
         hint: Use --workdir or GOBUMP_WORKDIR to pick another working directory\n\
         hint: Use --config or GOBUMP_CONFIG to point at the file directly",
        path = path.display(),
        file = CONFIG_FILE_NAME
    )
}

/// Wrap an error returned while opening merge requests with token hints.
pub fn request_failed(error: crate::error::Error, token_set: bool) -> anyhow::Error {
    if token_set {
        return error.into();
    }
    anyhow::anyhow!(
        "{error}\n\n\
         hint: Set {env} to a personal access token with the api scope",
        env = API_TOKEN_ENV
    )
}
