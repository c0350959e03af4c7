//! # Workspace Synchronisation
//!
//! Each library is worked on in a local clone under the libraries directory.
//! [`WorkspaceManager::prepare`] makes sure that clone exists and knows about
//! the latest remote refs:
//!
//! - if the workspace directory is missing, it is created and the repository
//!   cloned into it;
//! - if it exists, `git fetch` updates the remote-tracking refs. Nothing is
//!   merged or rebased; later steps branch from `origin/<target>` directly.
//!
//! Presence of the directory is the only state signal. A directory left
//! behind by an interrupted clone is treated as present and fetched, which
//! fails loudly rather than silently re-cloning over it.
//!
//! Clones hold private source, so the libraries directory and every
//! workspace are created owner-only (`0700`) on Unix.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::library::Library;
use crate::output::Progress;
use crate::runner::CommandRunner;

/// Create `path` and any missing parents, readable by the owner only.
pub fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}

/// Clones and fetches library workspaces.
pub struct WorkspaceManager<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> WorkspaceManager<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Ensure `library`'s workspace exists and has fresh remote refs.
    pub fn prepare(&self, library: &Library, progress: &dyn Progress) -> Result<()> {
        let workspace = library.workspace();

        if !workspace.exists() {
            // git takes the target as a string argument
            let target = workspace.to_str().ok_or_else(|| Error::Clone {
                library: library.name().to_string(),
                url: library.clone_url().to_string(),
                output: format!("workspace path {} is not valid UTF-8", workspace.display()),
            })?;
            progress.cloning(library.name());
            create_private_dir(workspace)?;
            return self.clone(library, target);
        }

        progress.fetching(library.name());
        self.fetch(library)
    }

    fn clone(&self, library: &Library, target: &str) -> Result<()> {
        info!("cloning {} into {}", library.clone_url(), target);

        let clone_error = |output: String| Error::Clone {
            library: library.name().to_string(),
            url: library.clone_url().to_string(),
            output,
        };

        let output = self
            .runner
            .run("git", &["clone", library.clone_url(), target], None)
            .map_err(|e| clone_error(e.to_string()))?;

        if !output.success {
            return Err(clone_error(output.describe_failure()));
        }
        debug!("{}", output.combined());
        Ok(())
    }

    fn fetch(&self, library: &Library) -> Result<()> {
        info!("fetching {}", library.name());

        let fetch_error = |output: String| Error::Fetch {
            library: library.name().to_string(),
            output,
        };

        let output = self
            .runner
            .run("git", &["fetch"], Some(library.workspace()))
            .map_err(|e| fetch_error(e.to_string()))?;

        if !output.success {
            return Err(fetch_error(output.describe_failure()));
        }
        debug!("{}", output.combined());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryId;
    use crate::output::SilentProgress;
    use crate::runner::fake::FakeRunner;
    use crate::runner::CommandOutput;
    use tempfile::TempDir;

    fn library(root: &std::path::Path) -> Library {
        Library::new(
            root,
            LibraryId::parse("git.example.com/org/alpha").unwrap(),
            "master",
        )
    }

    #[test]
    fn test_prepare_clones_missing_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(temp_dir.path());
        let runner = FakeRunner::new();
        let calls = runner.calls();

        WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap();

        assert!(library.workspace().is_dir());
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].command_line(),
            format!(
                "git clone https://git.example.com/org/alpha {}",
                library.workspace().display()
            )
        );
        assert_eq!(calls[0].dir, None);
    }

    #[test]
    fn test_prepare_fetches_existing_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(temp_dir.path());
        fs::create_dir_all(library.workspace()).unwrap();
        let runner = FakeRunner::new();
        let calls = runner.calls();

        WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command_line(), "git fetch");
        assert_eq!(calls[0].dir.as_deref(), Some(library.workspace()));
    }

    #[test]
    fn test_clone_failure_surfaces_as_clone_error() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(temp_dir.path());
        let runner = FakeRunner::new().respond(
            "git clone",
            CommandOutput::failed(128, "fatal: Authentication failed"),
        );

        let err = WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap_err();

        assert!(matches!(err, Error::Clone { .. }));
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[test]
    fn test_fetch_failure_surfaces_as_fetch_error() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(temp_dir.path());
        fs::create_dir_all(library.workspace()).unwrap();
        let runner = FakeRunner::new().respond(
            "git fetch",
            CommandOutput::failed(128, "fatal: not a git repository"),
        );

        let err = WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap_err();

        assert!(matches!(err, Error::Fetch { .. }));
        assert!(err.to_string().contains("not a git repository"));
    }

    #[cfg(unix)]
    #[test]
    fn test_cloned_workspace_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let library = library(&temp_dir.path().join("libraries"));
        let runner = FakeRunner::new();

        WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap();

        let mode = fs::metadata(library.workspace()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
        let host_dir = temp_dir.path().join("libraries").join("git.example.com");
        let mode = fs::metadata(host_dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_workspace_is_rejected_before_cloning() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(OsStr::from_bytes(b"libs\xFF"));
        let library = library(&root);
        let runner = FakeRunner::new();
        let calls = runner.calls();

        let err = WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap_err();

        assert!(matches!(err, Error::Clone { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
        assert!(calls.lock().unwrap().is_empty());
        assert!(!root.exists());
    }

    #[test]
    fn test_missing_git_binary_is_clone_error() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(temp_dir.path());
        let runner = FakeRunner::new().fail_spawn("git", std::io::ErrorKind::NotFound);

        let err = WorkspaceManager::new(&runner)
            .prepare(&library, &SilentProgress)
            .unwrap_err();

        assert!(matches!(err, Error::Clone { .. }));
    }
}
