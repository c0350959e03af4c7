//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::TWO_LIBRARIES);
//!     fixture.command().arg("upgrade").assert().failure();
//! }
//! ```

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Two libraries on the same host.
    pub const TWO_LIBRARIES: &str = r#"
libraries:
  - git.example.invalid/org/alpha
  - git.example.invalid/org/beta
"#;

    /// Mixed plain and detailed entries with a default branch.
    pub const WITH_BRANCHES: &str = r#"
default_branch: main
libraries:
  - git.example.invalid/org/alpha
  - name: git.example.invalid/org/beta
    branch: release
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "libraries: [unclosed";

    /// A misspelled top-level key.
    pub const UNKNOWN_KEY: &str = r#"
librarys:
  - git.example.invalid/org/alpha
"#;

    /// An identifier missing its repository segment.
    pub const BAD_IDENTIFIER: &str = r#"
libraries:
  - git.example.invalid/alpha
"#;
}

/// A temporary go-bump working directory with an optional `config.yaml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with an empty working directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `config.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// The working directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The libraries directory go-bump would create.
    #[allow(dead_code)]
    pub fn libraries_dir(&self) -> PathBuf {
        self.temp_dir.path().join("libraries")
    }

    /// Put stub `git` and `go` scripts in `bin/` and return a `PATH` that
    /// finds them first.
    ///
    /// The `git` stub creates the clone target and succeeds at everything
    /// else. The `go` stub prints `alpha_graph` for `go list` inside the
    /// `org/alpha` workspace and a graph holding only the main module
    /// anywhere else.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn with_stub_tools(&self, alpha_graph: &str) -> std::ffi::OsString {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.temp_dir.child("bin");
        bin.create_dir_all().expect("Failed to create bin directory");

        let git = "#!/bin/sh\nif [ \"$1\" = clone ]; then mkdir -p \"$3\"; fi\nexit 0\n";
        let go = format!(
            "#!/bin/sh\ncase \"$(pwd)\" in\n  */org/alpha) cat <<'EOF'\n{}\nEOF\n  ;;\n  *) echo '{{\"Path\": \"example.invalid/main\", \"Main\": true}}' ;;\nesac\n",
            alpha_graph
        );

        for (name, script) in [("git", git.to_string()), ("go", go)] {
            let path = bin.path().join(name);
            std::fs::write(&path, script).expect("Failed to write stub tool");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make stub tool executable");
        }

        let mut paths = vec![bin.path().to_path_buf()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).expect("Failed to build PATH")
    }

    /// A go-bump command pointed at this working directory, isolated from
    /// the caller's environment.
    pub fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("go-bump");
        cmd.arg("--workdir")
            .arg(self.path())
            .arg("--color")
            .arg("never")
            .env_remove("GOBUMP_CONFIG")
            .env_remove("GOBUMP_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
