//! # External Command Execution
//!
//! Every interaction with `git` and `go` goes through the [`CommandRunner`]
//! trait. The production implementation, [`SystemRunner`], spawns the real
//! processes and blocks until they exit; tests substitute a fake that records
//! each invocation and replays scripted output, so the workflow can be
//! exercised without a network, a Go toolchain or a real repository.
//!
//! The contract is deliberately narrow: a program, its arguments and an
//! optional working directory go in; exit status and captured output come
//! out. A non-zero exit is not an `Err` here. Callers decide which error
//! variant a failure maps to.

use std::path::Path;
use std::process::Command;

use log::debug;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// A run that exited with `code` after printing `stderr`.
    pub fn failed(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, lossily decoded and trimmed.
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&self.stderr);
        if !text.is_empty() && !stderr.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
        text.trim().to_string()
    }

    /// Combined output, or a description of the exit status when the process
    /// printed nothing.
    pub fn describe_failure(&self) -> String {
        let combined = self.combined();
        if !combined.is_empty() {
            return combined;
        }
        match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Trait for running external tools - allows faking in tests
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, in `dir` if given, and wait for it to exit.
    ///
    /// Returns `Err` only when the process could not be started at all.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: Option<&Path>,
    ) -> std::io::Result<CommandOutput>;
}

/// Runs commands with `std::process::Command`, inheriting the environment so
/// git credential helpers, SSH agents and `GOPRIVATE`/`GOPROXY` settings apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: Option<&Path>,
    ) -> std::io::Result<CommandOutput> {
        debug!(
            "running `{} {}`{}",
            program,
            args.join(" "),
            dir.map(|d| format!(" in {}", d.display()))
                .unwrap_or_default()
        );

        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        let output = command.output()?;

        debug!("`{}` finished with {}", program, output.status);
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_output_joins_streams() {
        let output = CommandOutput {
            success: false,
            code: Some(1),
            stdout: b"Cloning into 'alpha'...".to_vec(),
            stderr: b"fatal: repository not found\n".to_vec(),
        };
        assert_eq!(
            output.combined(),
            "Cloning into 'alpha'...\nfatal: repository not found"
        );
    }

    #[test]
    fn test_describe_failure_without_output() {
        assert_eq!(
            CommandOutput::failed(128, "").describe_failure(),
            "exited with status 128"
        );
        let killed = CommandOutput {
            success: false,
            code: None,
            ..Default::default()
        };
        assert_eq!(killed.describe_failure(), "terminated by signal");
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let result = SystemRunner.run("go-bump-definitely-not-a-program", &[], None);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_exit_status() {
        let ok = SystemRunner.run("sh", &["-c", "echo hello"], None).unwrap();
        assert!(ok.success);
        assert_eq!(ok.combined(), "hello");

        let failed = SystemRunner.run("sh", &["-c", "echo oops >&2; exit 3"], None).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
        assert_eq!(failed.combined(), "oops");
    }

    #[test]
    fn test_fake_runner_scripts_by_prefix_and_dir() {
        use fake::FakeRunner;
        use std::path::PathBuf;

        let alpha = PathBuf::from("/libs/alpha");
        let runner = FakeRunner::new()
            .respond_in(&alpha, "go list", CommandOutput::ok("alpha"))
            .respond("go list", CommandOutput::ok("other"))
            .respond("git fetch", CommandOutput::failed(1, "offline"));
        let calls = runner.calls();

        let out = runner.run("go", &["list", "-m"], Some(&alpha)).unwrap();
        assert_eq!(out.combined(), "alpha");
        let out = runner.run("go", &["list", "-m"], Some(Path::new("/libs/beta"))).unwrap();
        assert_eq!(out.combined(), "other");
        assert!(!runner.run("git", &["fetch"], None).unwrap().success);
        assert!(runner.run("git", &["status"], None).unwrap().success);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].command_line(), "go list -m");
        assert_eq!(calls[0].dir.as_deref(), Some(alpha.as_path()));
    }
}
