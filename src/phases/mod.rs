//! Implementation of the 2 phases of a go-bump upgrade run.
//!
//! ## Overview
//!
//! An upgrade run follows 2 phases:
//! 1. Sync - Clone missing workspaces and fetch existing ones, for every library
//! 2. Update - For each library in order: check the module graph, apply the
//!    bump and open a merge request
//!
//! Phase 1 finishes for the whole fleet before phase 2 touches any library.
//! Both phases stop at the first error, and the orchestrator does not start
//! the next library or phase after one.

// Phase modules
pub mod orchestrator;
pub mod sync;
pub mod update;

// Re-export phase modules to preserve public API
pub use sync as phase1;
pub use update as phase2;

/// The operator's intent for one run: which module to move to which version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Module path of the dependency, itself a managed library.
    pub dependency: String,
    /// Version to pin, passed to `go get` verbatim.
    pub version: String,
}

impl UpdateRequest {
    pub fn new(dependency: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            dependency: dependency.into(),
            version: version.into(),
        }
    }
}

/// What happened to one library during phase 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryOutcome {
    /// The library does not directly require the dependency.
    NotDependent,
    /// Dry run: the library depends on the dependency and would get `branch`.
    Planned { branch: String },
    /// A branch was pushed and a merge request opened.
    Proposed { branch: String, url: String },
}

/// Outcome of a successful run, one entry per library in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<(String, LibraryOutcome)>,
}

impl RunReport {
    /// Merge request URLs in library order.
    pub fn urls(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                LibraryOutcome::Proposed { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Libraries found to directly require the dependency.
    pub fn dependents(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome != LibraryOutcome::NotDependent)
            .map(|(library, _)| library.as_str())
            .collect()
    }
}
