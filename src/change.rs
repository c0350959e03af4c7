//! # Applying a Dependency Bump
//!
//! [`ChangeApplier::apply`] turns a prepared workspace into a pushed branch
//! carrying the version bump. It runs four steps, strictly in order:
//!
//! 1. `git checkout -b <branch> origin/<target>`
//! 2. `go get <module>@<version>` rewrites `go.mod` and `go.sum`
//! 3. `git add go.mod go.sum` then `git commit -m "update <module> to <version>"`
//! 4. `git push -u origin <branch>`
//!
//! The first failing step aborts with its own error variant. Nothing is
//! rolled back: a branch created in step 1 stays in the workspace if step 2
//! fails. Branch names end in a second-resolution timestamp, so re-running
//! the same bump later creates a fresh branch instead of colliding with the
//! previous one.

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::library::Library;
use crate::runner::CommandRunner;

/// Manifest files `go get` rewrites and the commit stages.
pub const MANIFEST_FILES: [&str; 2] = ["go.mod", "go.sum"];

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Source of the branch timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// `update_<module>_to_<version>_<YYYYmmddHHMMSS>`
pub fn branch_name(dependency: &str, version: &str, at: DateTime<Local>) -> String {
    format!(
        "update_{}_to_{}_{}",
        dependency,
        version,
        at.format(TIMESTAMP_FORMAT)
    )
}

/// Commit message, also used as the merge request title.
pub fn commit_message(dependency: &str, version: &str) -> String {
    format!("update {} to {}", dependency, version)
}

/// A branch pushed by [`ChangeApplier::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    pub branch: String,
    pub message: String,
}

/// Creates, commits and pushes update branches.
pub struct ChangeApplier<'a> {
    runner: &'a dyn CommandRunner,
    clock: &'a dyn Clock,
}

impl<'a> ChangeApplier<'a> {
    pub fn new(runner: &'a dyn CommandRunner, clock: &'a dyn Clock) -> Self {
        Self { runner, clock }
    }

    /// The branch name a bump started now would use.
    pub fn plan(&self, dependency: &str, version: &str) -> String {
        branch_name(dependency, version, self.clock.now())
    }

    /// Run branch, update, commit and push for `library`.
    pub fn apply(
        &self,
        library: &Library,
        dependency: &str,
        version: &str,
    ) -> Result<AppliedChange> {
        let branch = self.plan(dependency, version);
        let message = commit_message(dependency, version);
        let name = library.name().to_string();

        info!("{}: creating branch {}", name, branch);
        let upstream = format!("origin/{}", library.target_branch());
        self.step(library, "git", &["checkout", "-b", &branch, &upstream])
            .map_err(|output| Error::Branch {
                library: name.clone(),
                branch: branch.clone(),
                output,
            })?;

        let module = format!("{}@{}", dependency, version);
        info!("{}: go get {}", name, module);
        self.step(library, "go", &["get", &module])
            .map_err(|output| Error::Update {
                library: name.clone(),
                module: module.clone(),
                output,
            })?;

        let commit_error = |output: String| Error::Commit {
            library: name.clone(),
            output,
        };
        let mut add_args = vec!["add"];
        add_args.extend(MANIFEST_FILES);
        self.step(library, "git", &add_args).map_err(commit_error)?;
        self.step(library, "git", &["commit", "-m", &message])
            .map_err(commit_error)?;

        info!("{}: pushing {}", name, branch);
        self.step(library, "git", &["push", "-u", "origin", &branch])
            .map_err(|output| Error::Push {
                library: name.clone(),
                branch: branch.clone(),
                output,
            })?;

        Ok(AppliedChange { branch, message })
    }

    /// Run one command in the workspace; `Err` carries the failure text.
    fn step(
        &self,
        library: &Library,
        program: &str,
        args: &[&str],
    ) -> std::result::Result<(), String> {
        let output = self
            .runner
            .run(program, args, Some(library.workspace()))
            .map_err(|e| format!("failed to run {}: {}", program, e))?;

        if !output.success {
            return Err(output.describe_failure());
        }
        let combined = output.combined();
        if !combined.is_empty() {
            debug!("{}", combined);
        }
        Ok(())
    }
}
