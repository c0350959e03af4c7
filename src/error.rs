//! # Error Handling
//!
//! This module defines the centralized error type for `go-bump`. Every stage
//! of an upgrade run has its own variant so the operator can tell at a glance
//! whether a run stopped while syncing workspaces, reading a dependency graph,
//! applying a change or talking to the hosting platform.
//!
//! ## Taxonomy
//!
//! - **`InvalidArgument`**: the requested dependency is not a managed library.
//! - **`Clone`** / **`Fetch`**: workspace synchronisation failures.
//! - **`GraphQuery`**: `go list` could not be run or its output not decoded.
//! - **`Branch`** / **`Update`** / **`Commit`** / **`Push`**: the four steps of
//!   applying a change to a workspace.
//! - **`Request`**: the hosting platform rejected the merge request.
//!
//! Every one of these is fatal to the whole run. Earlier libraries keep
//! whatever branches and merge requests were already created.

use thiserror::Error;

/// Main error type for go-bump operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A library identifier is not of the form `host/organization/repository`.
    #[error("Invalid library identifier '{name}': {message}")]
    InvalidLibrary { name: String, message: String },

    /// The operator asked for something the tool refuses to do.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Cloning a library into its workspace failed.
    #[error("Git clone error for {library} ({url}): {output}")]
    Clone {
        library: String,
        url: String,
        output: String,
    },

    /// Fetching remote refs into an existing workspace failed.
    #[error("Git fetch error for {library}: {output}")]
    Fetch { library: String, output: String },

    /// The module graph of a library could not be listed or decoded.
    #[error("Dependency graph query failed for {library}: {message}")]
    GraphQuery { library: String, message: String },

    /// Creating the update branch failed.
    #[error("Failed to create branch {branch} in {library}: {output}")]
    Branch {
        library: String,
        branch: String,
        output: String,
    },

    /// The package manager could not pin the requested version.
    #[error("Failed to update {module} in {library}: {output}")]
    Update {
        library: String,
        module: String,
        output: String,
    },

    /// Staging or committing the manifest changes failed.
    #[error("Failed to commit changes in {library}: {output}")]
    Commit { library: String, output: String },

    /// Pushing the update branch failed.
    #[error("Failed to push branch {branch} for {library}: {output}")]
    Push {
        library: String,
        branch: String,
        output: String,
    },

    /// The hosting platform refused to create the merge request.
    #[error("Merge request for {library} failed: {message}")]
    Request { library: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
