//! Orchestrator for the complete upgrade run
//!
//! This module coordinates both phases over the configured fleet. The
//! [`Orchestrator`] owns its collaborators behind traits (command runner,
//! merge request client, clock, progress sink) so the CLI wires in the real
//! ones and tests substitute fakes.

use log::info;

use super::{phase1, phase2, RunReport, UpdateRequest};
use crate::change::{ChangeApplier, Clock, SystemClock};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::graph::DependencyGraphReader;
use crate::hosting::ReviewRequester;
use crate::output::{Progress, SilentProgress};
use crate::runner::{CommandRunner, SystemRunner};

/// Drives an upgrade across every configured library.
pub struct Orchestrator {
    config: RunConfig,
    runner: Box<dyn CommandRunner>,
    requester: Box<dyn ReviewRequester>,
    clock: Box<dyn Clock>,
    progress: Box<dyn Progress>,
    dry_run: bool,
}

impl Orchestrator {
    /// Creates an orchestrator running real `git` and `go` processes.
    pub fn new(config: RunConfig, requester: Box<dyn ReviewRequester>) -> Self {
        Self {
            config,
            runner: Box::new(SystemRunner),
            requester,
            clock: Box::new(SystemClock),
            progress: Box::new(SilentProgress),
            dry_run: false,
        }
    }

    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Detect dependents without branching, pushing or opening requests.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute the complete upgrade run (Phases 1-2)
    ///
    /// 1. Validate the request; nothing touches disk or network on failure
    /// 2. Sync every library workspace
    /// 3. For each library in configured order, detect, apply and request
    ///
    /// The first error from any library ends the run. Libraries after it are
    /// not attempted and work already pushed for earlier ones is kept.
    pub fn run(&self, request: &UpdateRequest) -> Result<RunReport> {
        self.validate(request)?;

        let libraries = self.config.libraries();

        info!("Phase 1: syncing {} workspaces", libraries.len());
        phase1::execute(
            &self.config,
            &libraries,
            self.runner.as_ref(),
            self.progress.as_ref(),
        )?;

        info!(
            "Phase 2: updating {} to {}",
            request.dependency, request.version
        );
        let pipeline = phase2::Pipeline {
            graph: DependencyGraphReader::new(self.runner.as_ref()),
            applier: ChangeApplier::new(self.runner.as_ref(), self.clock.as_ref()),
            requester: self.requester.as_ref(),
            progress: self.progress.as_ref(),
            dry_run: self.dry_run,
        };

        let mut report = RunReport::default();
        for library in &libraries {
            let outcome = phase2::execute(library, request, &pipeline)?;
            report.outcomes.push((library.name().to_string(), outcome));
        }

        Ok(report)
    }

    fn validate(&self, request: &UpdateRequest) -> Result<()> {
        if !self.config.is_managed(&request.dependency) {
            return Err(Error::InvalidArgument {
                message: format!(
                    "dependency '{}' should be from libraries list",
                    request.dependency
                ),
            });
        }
        if request.version.trim().is_empty() {
            return Err(Error::InvalidArgument {
                message: "version must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
