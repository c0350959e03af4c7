//! Phase 1: Workspace Sync
//!
//! This module brings every library's workspace up to date before any
//! library is modified. Libraries are handled one at a time in configured
//! order and the phase stops at the first clone or fetch failure, so a
//! broken remote is reported before any branch is pushed anywhere.

use crate::config::RunConfig;
use crate::error::Result;
use crate::library::Library;
use crate::output::Progress;
use crate::runner::CommandRunner;
use crate::workspace::{create_private_dir, WorkspaceManager};

/// Execute Phase 1: create the libraries directory and prepare every workspace
pub fn execute(
    config: &RunConfig,
    libraries: &[Library],
    runner: &dyn CommandRunner,
    progress: &dyn Progress,
) -> Result<()> {
    create_private_dir(config.libraries_dir())?;

    let manager = WorkspaceManager::new(runner);
    for library in libraries {
        manager.prepare(library, progress)?;
    }

    Ok(())
}
