//! # Module Graph Inspection
//!
//! Decides whether a library directly requires a given module by asking the
//! Go toolchain for the resolved module graph:
//!
//! ```text
//! go list -m -json all
//! ```
//!
//! which prints one JSON object per module, back to back, with no enclosing
//! array. Records are decoded lazily with `serde_json`'s stream deserializer
//! and decoding stops at the first record whose `Path` equals the queried
//! module. Later records, including malformed ones, are never looked at.
//!
//! When a path is listed more than once, the first occurrence decides.

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::library::Library;
use crate::runner::CommandRunner;

/// The subset of a `go list -m -json` record go-bump cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModuleRecord {
    pub path: String,
    pub version: String,
    /// Set on the module whose graph is being listed.
    pub main: bool,
    /// Set when the module is only required transitively.
    pub indirect: bool,
}

impl ModuleRecord {
    /// A direct requirement is neither the main module nor indirect.
    pub fn is_direct_requirement(&self) -> bool {
        !self.main && !self.indirect
    }
}

/// Lazily decode a stream of concatenated JSON module records.
pub fn decode_records(
    output: &[u8],
) -> impl Iterator<Item = serde_json::Result<ModuleRecord>> + '_ {
    serde_json::Deserializer::from_slice(output).into_iter::<ModuleRecord>()
}

/// Consume `records` until one has `path`, returning it.
///
/// Stops at the first match; a decoding error before that point is returned.
pub fn find_module<I>(records: I, path: &str) -> serde_json::Result<Option<ModuleRecord>>
where
    I: IntoIterator<Item = serde_json::Result<ModuleRecord>>,
{
    for record in records {
        let record = record?;
        if record.path == path {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

/// Answers dependency questions about library workspaces.
pub struct DependencyGraphReader<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> DependencyGraphReader<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Whether `library` directly, non-transitively requires `dependency`.
    pub fn is_dependent(&self, library: &Library, dependency: &str) -> Result<bool> {
        let query_error = |message: String| Error::GraphQuery {
            library: library.name().to_string(),
            message,
        };

        let output = self
            .runner
            .run(
                "go",
                &["list", "-m", "-json", "all"],
                Some(library.workspace()),
            )
            .map_err(|e| query_error(format!("failed to run go list: {}", e)))?;

        if !output.success {
            return Err(query_error(output.describe_failure()));
        }

        // Only stdout carries JSON; go writes download chatter to stderr.
        let found = find_module(decode_records(&output.stdout), dependency)
            .map_err(|e| query_error(format!("invalid go list output: {}", e)))?;

        match found {
            Some(record) => {
                debug!(
                    "{}: {} {} (main: {}, indirect: {})",
                    library.name(),
                    record.path,
                    record.version,
                    record.main,
                    record.indirect
                );
                Ok(record.is_direct_requirement())
            }
            None => {
                debug!("{}: {} not in module graph", library.name(), dependency);
                Ok(false)
            }
        }
    }
}
