//! # go-bump
//!
//! This library bumps one Go module across a fleet of Go libraries hosted on
//! GitLab. It is designed to be used by the `go-bump` command-line tool, but
//! the orchestration is reachable directly for callers that want to supply
//! their own command runner or hosting client.
//!
//! ## Quick Example
//!
//! ```
//! use go_bump::config;
//!
//! let yaml = r#"
//! default_branch: main
//! libraries:
//!   - gitlab.example.com/platform/logging
//!   - name: gitlab.example.com/platform/billing
//!     branch: release
//! "#;
//! let config = config::parse(yaml).unwrap();
//! assert_eq!(config.libraries.len(), 2);
//! assert_eq!(config.target_branch(&config.libraries[0]), "main");
//! assert_eq!(config.target_branch(&config.libraries[1]), "release");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `config.yaml` schema listing managed
//!   libraries, and the run-wide [`config::RunConfig`].
//! - **Libraries (`library`)**: `host/organization/repository` identifiers and
//!   the workspace, clone URL and target branch derived from them.
//! - **Collaborators (`runner`, `hosting`)**: Traits standing in front of
//!   `git`/`go` processes and the GitLab API.
//! - **Phases (`phases`)**: The two-phase run, sync then update, driven by
//!   [`phases::orchestrator::Orchestrator`].
//!
//! ## Execution Flow
//!
//! 1.  **Validation**: The dependency must itself be a managed library.
//! 2.  **Sync**: Clone or fetch every library workspace.
//! 3.  **Update**: For each library that directly requires the dependency,
//!     branch, `go get`, commit, push and open a merge request.

pub mod change;
pub mod config;
pub mod defaults;
pub mod error;
pub mod graph;
pub mod hosting;
pub mod library;
pub mod output;
pub mod phases;
pub mod runner;
pub mod suggestions;
pub mod workspace;
